// Android KeyEvent codes -> editor keys
// Values from android.view.KeyEvent

use wledit_editor::Key;

pub const KEYCODE_DPAD_UP: i32 = 19;
pub const KEYCODE_DPAD_DOWN: i32 = 20;
pub const KEYCODE_DPAD_LEFT: i32 = 21;
pub const KEYCODE_DPAD_RIGHT: i32 = 22;
pub const KEYCODE_A: i32 = 29;
pub const KEYCODE_Z: i32 = 54;
pub const KEYCODE_SHIFT_LEFT: i32 = 59;
pub const KEYCODE_TAB: i32 = 61;
pub const KEYCODE_SPACE: i32 = 62;
pub const KEYCODE_ENTER: i32 = 66;
pub const KEYCODE_DEL: i32 = 67;
pub const KEYCODE_PAGE_UP: i32 = 92;
pub const KEYCODE_PAGE_DOWN: i32 = 93;
pub const KEYCODE_ESCAPE: i32 = 111;
pub const KEYCODE_FORWARD_DEL: i32 = 112;
pub const KEYCODE_MOVE_HOME: i32 = 122;
pub const KEYCODE_MOVE_END: i32 = 123;
pub const KEYCODE_CUT: i32 = 277;
pub const KEYCODE_COPY: i32 = 278;
pub const KEYCODE_PASTE: i32 = 279;

/// Map a key code plus the event's unicode char (0 when none) to a [`Key`].
pub fn key_from_android(key_code: i32, unicode: i32) -> Option<Key> {
    let key = match key_code {
        KEYCODE_DPAD_UP => Key::Up,
        KEYCODE_DPAD_DOWN => Key::Down,
        KEYCODE_DPAD_LEFT => Key::Left,
        KEYCODE_DPAD_RIGHT => Key::Right,
        KEYCODE_TAB => Key::Tab,
        KEYCODE_ENTER => Key::Enter,
        KEYCODE_DEL => Key::Backspace,
        KEYCODE_FORWARD_DEL => Key::Delete,
        KEYCODE_PAGE_UP => Key::PageUp,
        KEYCODE_PAGE_DOWN => Key::PageDown,
        KEYCODE_ESCAPE => Key::Escape,
        KEYCODE_MOVE_HOME => Key::Home,
        KEYCODE_MOVE_END => Key::End,
        KEYCODE_SPACE => Key::Char(' '),
        KEYCODE_CUT => Key::Cut,
        KEYCODE_COPY => Key::Copy,
        KEYCODE_PASTE => Key::Paste,
        _ => {
            let typed = u32::try_from(unicode)
                .ok()
                .filter(|&c| c != 0)
                .and_then(char::from_u32)
                .filter(|c| !c.is_control());
            if let Some(c) = typed {
                Key::Char(c)
            } else if (KEYCODE_A..=KEYCODE_Z).contains(&key_code) {
                Key::Char(char::from(b'a' + (key_code - KEYCODE_A) as u8))
            } else {
                return None;
            }
        }
    };
    Some(key)
}
