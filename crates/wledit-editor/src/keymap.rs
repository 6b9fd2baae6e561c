// WordStar key bindings
//
// Ctrl+Q and Ctrl+K start two-key commands. A pending prefix is dropped if
// the second key does not arrive within `PREFIX_TIMEOUT`.

use std::time::{Duration, Instant};

pub const PREFIX_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Escape,
    // Dedicated clipboard keys found on some hardware keyboards.
    Cut,
    Copy,
    Paste,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    pub fn ctrl(letter: char) -> Self {
        Self {
            key: Key::Char(letter),
            ctrl: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Insert(String),
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
    DocStart,
    DocEnd,
    PageUp,
    PageDown,
    ScreenTop,
    ScreenBottom,
    Backspace,
    DeleteForward,
    DeleteWordRight,
    DeleteToLineEnd,
    BlockBegin,
    BlockCopy,
    BlockCutOrDeleteLine,
    PasteCurrent,
    PasteCycle,
    SelectAll,
    Copy,
    Cut,
    Paste,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    Q,
    K,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Action(Action),
    /// First half of a two-key command; waiting for the second key.
    Pending(Prefix),
    /// Swallowed without effect (the second key of an unknown combination).
    Consumed,
    /// Not a binding; the host may handle the key itself.
    Unbound,
}

#[derive(Debug, Default)]
pub struct Keymap {
    pending: Option<(Prefix, Instant)>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self, now: Instant) -> Option<Prefix> {
        self.pending
            .filter(|(_, since)| now.duration_since(*since) < PREFIX_TIMEOUT)
            .map(|(prefix, _)| prefix)
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }

    pub fn resolve(&mut self, press: KeyPress, now: Instant) -> Resolution {
        if let Some(prefix) = self.pending(now) {
            self.pending = None;
            if !press.ctrl {
                return Resolution::Consumed;
            }
            let action = match (prefix, ctrl_letter(press.key)) {
                (Prefix::Q, Some('r')) => Some(Action::DocStart),
                (Prefix::Q, Some('c')) => Some(Action::DocEnd),
                (Prefix::Q, Some('s')) => Some(Action::LineStart),
                (Prefix::Q, Some('d')) => Some(Action::LineEnd),
                (Prefix::Q, Some('e')) => Some(Action::ScreenTop),
                (Prefix::Q, Some('x')) => Some(Action::ScreenBottom),
                (Prefix::K, Some('b')) => Some(Action::BlockBegin),
                (Prefix::K, Some('k')) => Some(Action::BlockCopy),
                (Prefix::K, Some('c')) => Some(Action::PasteCurrent),
                (Prefix::K, Some('v')) => Some(Action::PasteCycle),
                (Prefix::K, Some('y')) => Some(Action::BlockCutOrDeleteLine),
                _ => None,
            };
            return action.map_or(Resolution::Consumed, Resolution::Action);
        }
        self.pending = None;

        if press.ctrl {
            return match ctrl_letter(press.key) {
                Some('q') => {
                    self.pending = Some((Prefix::Q, now));
                    Resolution::Pending(Prefix::Q)
                }
                Some('k') => {
                    self.pending = Some((Prefix::K, now));
                    Resolution::Pending(Prefix::K)
                }
                Some(letter) => single_ctrl(letter).map_or(Resolution::Unbound, Resolution::Action),
                None => Resolution::Unbound,
            };
        }

        let action = match press.key {
            Key::Char(c) => Action::Insert(c.to_string()),
            Key::Enter => Action::Insert("\n".to_string()),
            Key::Tab => Action::Insert("\t".to_string()),
            Key::Backspace => Action::Backspace,
            Key::Delete => Action::DeleteForward,
            Key::Left => Action::MoveLeft,
            Key::Right => Action::MoveRight,
            Key::Up => Action::MoveUp,
            Key::Down => Action::MoveDown,
            Key::Home => Action::LineStart,
            Key::End => Action::LineEnd,
            Key::PageUp => Action::PageUp,
            Key::PageDown => Action::PageDown,
            Key::Escape => return Resolution::Unbound,
            Key::Cut => Action::Cut,
            Key::Copy => Action::Copy,
            Key::Paste => Action::Paste,
        };
        Resolution::Action(action)
    }
}

fn ctrl_letter(key: Key) -> Option<char> {
    match key {
        Key::Char(c) if c.is_ascii_alphabetic() => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

fn single_ctrl(letter: char) -> Option<Action> {
    let action = match letter {
        'e' => Action::MoveUp,
        's' => Action::MoveLeft,
        'd' => Action::MoveRight,
        'x' => Action::MoveDown,
        'r' => Action::PageUp,
        'c' => Action::PageDown,
        'g' => Action::DeleteForward,
        'h' => Action::Backspace,
        't' => Action::DeleteWordRight,
        'y' => Action::DeleteToLineEnd,
        'a' => Action::WordLeft,
        'f' => Action::WordRight,
        _ => return None,
    };
    Some(action)
}
