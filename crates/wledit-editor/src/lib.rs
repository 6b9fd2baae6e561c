mod buffer;
mod clipboard;
mod document;
mod editor;
mod history;
mod keymap;
mod search;
mod wrap;

pub use buffer::Buffer;
pub use clipboard::{Clipboard, HISTORY_CAPACITY, MemoryClipboard, SystemClipboard};
pub use document::{APP_NAME, Document, SaveChoice};
pub use editor::{DEFAULT_VIEWPORT_LINES, Editor, Position};
pub use history::{Edit, History, UNDO_LIMIT};
pub use keymap::{Action, Key, KeyPress, Keymap, PREFIX_TIMEOUT, Prefix, Resolution};
pub use search::{Direction, SearchOptions, find_all};
pub use wrap::{DEFAULT_WRAP_WIDTH, MAX_WRAP_WIDTH, wrap_line};
