// Key scripts: a compact text form of keystrokes for replaying WordStar
// commands from the shell.
//
//   ^X   Ctrl+X          ^^   literal '^'
//   \n   Enter           \t   Tab
//   \b   Backspace       \d   Delete
//   \\   literal '\'     anything else types itself

use anyhow::{Result, bail};
use wledit_editor::{Key, KeyPress};

pub fn parse(script: &str) -> Result<Vec<KeyPress>> {
    let mut presses = Vec::new();
    let mut chars = script.chars();
    while let Some(c) = chars.next() {
        let press = match c {
            '^' => match chars.next() {
                Some('^') => KeyPress::plain(Key::Char('^')),
                Some(letter) if letter.is_ascii_alphabetic() => KeyPress::ctrl(letter),
                Some(other) => bail!("Unsupported control key: ^{}", other),
                None => bail!("Key script ends with a dangling '^'"),
            },
            '\\' => match chars.next() {
                Some('n') => KeyPress::plain(Key::Enter),
                Some('t') => KeyPress::plain(Key::Tab),
                Some('b') => KeyPress::plain(Key::Backspace),
                Some('d') => KeyPress::plain(Key::Delete),
                Some('\\') => KeyPress::plain(Key::Char('\\')),
                Some(other) => bail!("Unknown escape: \\{}", other),
                None => bail!("Key script ends with a dangling '\\'"),
            },
            c => KeyPress::plain(Key::Char(c)),
        };
        presses.push(press);
    }
    Ok(presses)
}
