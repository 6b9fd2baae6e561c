//! Process-wide editor instance behind the JNI entry points.
//!
//! JNI calls can arrive on any Java thread, so the engine lives in a global
//! mutex. Every call is a no-op (or returns a neutral value) until
//! [`init`] has run.
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use wledit_editor::{Editor, KeyPress};

use crate::keycodes;

static ENGINE: Mutex<Option<Editor>> = Mutex::new(None);

fn engine() -> MutexGuard<'static, Option<Editor>> {
    // A panic mid-edit leaves a usable editor; keep serving it.
    ENGINE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_engine<R>(f: impl FnOnce(&mut Editor) -> R) -> Option<R> {
    let mut guard = engine();
    match guard.as_mut() {
        Some(editor) => Some(f(editor)),
        None => {
            log::warn!("editor used before nativeInit");
            None
        }
    }
}

/// Create a fresh editor, replacing any previous one.
pub fn init() {
    let replaced = engine().replace(Editor::new()).is_some();
    if replaced {
        log::info!("editor re-initialized");
    } else {
        log::info!("editor initialized");
    }
}

pub fn is_initialized() -> bool {
    engine().is_some()
}

pub fn insert_text(text: &str) {
    if text.is_empty() {
        return;
    }
    with_engine(|editor| {
        editor.insert_text(text);
        log::debug!("inserted {} bytes", text.len());
    });
}

pub fn text() -> String {
    with_engine(|editor| editor.text().to_string()).unwrap_or_default()
}

/// Backspace: remove the character before the cursor.
pub fn delete_char() {
    with_engine(Editor::backspace);
}

/// Move the cursor to a character index; out-of-range values are ignored.
pub fn set_cursor(position: i32) {
    let Ok(position) = usize::try_from(position) else {
        log::debug!("ignoring negative cursor position {}", position);
        return;
    };
    with_engine(|editor| {
        if !editor.set_cursor_char(position) {
            log::debug!("ignoring cursor position {} past end", position);
        }
    });
}

pub fn cursor() -> i32 {
    with_engine(|editor| i32::try_from(editor.cursor_char()).unwrap_or(i32::MAX)).unwrap_or(0)
}

pub fn undo() -> bool {
    with_engine(Editor::undo).unwrap_or(false)
}

pub fn redo() -> bool {
    with_engine(Editor::redo).unwrap_or(false)
}

pub fn select_all() {
    with_engine(Editor::select_all);
}

/// Copy the selection to the clipboard. Returns whether anything was selected.
pub fn copy() -> bool {
    with_engine(Editor::copy).unwrap_or(false)
}

pub fn cut() -> bool {
    with_engine(Editor::cut).unwrap_or(false)
}

pub fn paste() -> bool {
    with_engine(Editor::paste).unwrap_or(false)
}

/// Feed an Android key event through the WordStar keymap.
pub fn key_event(key_code: i32, unicode: i32, ctrl: bool) -> bool {
    let Some(key) = keycodes::key_from_android(key_code, unicode) else {
        return false;
    };
    let press = KeyPress { key, ctrl };
    with_engine(|editor| editor.handle_key(press, Instant::now())).unwrap_or(false)
}

/// Drop the editor; later calls behave as before `init`.
pub fn shutdown() {
    if engine().take().is_some() {
        log::info!("editor released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The engine is global; tests touching it take this lock.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn serial() -> MutexGuard<'static, ()> {
        SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn calls_before_init_are_noops() {
        let _guard = serial();
        shutdown();
        assert!(!is_initialized());
        insert_text("lost");
        delete_char();
        assert_eq!(text(), "");
        assert_eq!(cursor(), 0);
        assert!(!undo());
    }

    #[test]
    fn insert_get_delete() {
        let _guard = serial();
        init();
        insert_text("Hello");
        insert_text(", world");
        assert_eq!(text(), "Hello, world");
        delete_char();
        delete_char();
        assert_eq!(text(), "Hello, wor");
        assert_eq!(cursor(), 10);
        shutdown();
    }

    #[test]
    fn delete_on_empty_buffer_is_noop() {
        let _guard = serial();
        init();
        delete_char();
        assert_eq!(text(), "");
        shutdown();
    }

    #[test]
    fn init_resets_content() {
        let _guard = serial();
        init();
        insert_text("old");
        init();
        assert_eq!(text(), "");
        shutdown();
    }

    #[test]
    fn cursor_positions_are_characters() {
        let _guard = serial();
        init();
        insert_text("日本語");
        set_cursor(1);
        assert_eq!(cursor(), 1);
        insert_text("x");
        assert_eq!(text(), "日x本語");
        set_cursor(-1);
        set_cursor(99);
        assert_eq!(cursor(), 2);
        delete_char();
        assert_eq!(text(), "日本語");
        shutdown();
    }

    #[test]
    fn undo_and_redo() {
        let _guard = serial();
        init();
        insert_text("abc");
        assert!(undo());
        assert_eq!(text(), "");
        assert!(redo());
        assert_eq!(text(), "abc");
        shutdown();
    }

    #[test]
    fn key_events_drive_wordstar_commands() {
        let _guard = serial();
        init();
        insert_text("abc");
        // Ctrl+Q, Ctrl+S: line start; then type.
        assert!(key_event(keycodes::KEYCODE_A + ('q' as i32 - 'a' as i32), 0, true));
        assert!(key_event(keycodes::KEYCODE_A + ('s' as i32 - 'a' as i32), 0, true));
        assert!(key_event(keycodes::KEYCODE_A + 23, 'x' as i32, false));
        assert_eq!(text(), "xabc");
        shutdown();
    }

    #[test]
    fn modifier_keys_keep_a_pending_prefix() {
        let _guard = serial();
        init();
        insert_text("abc");
        set_cursor(0);
        let ctrl_k = keycodes::KEYCODE_A + ('k' as i32 - 'a' as i32);
        let ctrl_b = keycodes::KEYCODE_A + ('b' as i32 - 'a' as i32);
        let ctrl_d = keycodes::KEYCODE_A + ('d' as i32 - 'a' as i32);

        assert!(key_event(ctrl_k, 0, true));
        assert!(!key_event(keycodes::KEYCODE_SHIFT_LEFT, 0, true));
        assert!(key_event(ctrl_b, 0, true));
        assert!(key_event(ctrl_d, 0, true));
        assert!(key_event(ctrl_d, 0, true));

        assert!(key_event(ctrl_k, 0, true));
        assert!(key_event(ctrl_k, 0, true));
        assert!(key_event(keycodes::KEYCODE_PASTE, 0, false));
        assert_eq!(text(), "ababc");
        shutdown();
    }

    #[test]
    fn edit_menu_operations() {
        let _guard = serial();
        init();
        insert_text("hello");
        select_all();
        assert!(copy());
        assert!(cut());
        assert_eq!(text(), "");
        assert!(paste());
        assert!(paste());
        assert_eq!(text(), "hellohello");
        shutdown();
    }
}
