use std::collections::VecDeque;

/// Number of entries kept in the clipboard history.
pub const HISTORY_CAPACITY: usize = 10;

/// Platform clipboard seam. Hosts with a real clipboard implement this; the
/// editor falls back to [`MemoryClipboard`].
pub trait SystemClipboard: Send {
    fn get(&self) -> Option<String>;
    fn set(&mut self, text: &str);
}

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl SystemClipboard for MemoryClipboard {
    fn get(&self) -> Option<String> {
        self.contents.clone()
    }

    fn set(&mut self, text: &str) {
        self.contents = Some(text.to_string());
    }
}

/// WordStar-style clipboard ring: newest entry first, with a paste index
/// that `^KV` walks through the older entries.
pub struct Clipboard {
    history: VecDeque<String>,
    index: usize,
    system: Box<dyn SystemClipboard>,
}

impl Clipboard {
    pub fn new(system: Box<dyn SystemClipboard>) -> Self {
        Self {
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
            index: 0,
            system,
        }
    }

    /// Add `text` as the newest entry and mirror it to the system clipboard.
    pub fn push(&mut self, text: String) {
        self.system.set(&text);
        self.push_history(text);
    }

    /// Add to the history only (deleted lines are not copied to the system
    /// clipboard).
    pub fn push_history(&mut self, text: String) {
        self.history.push_front(text);
        self.history.truncate(HISTORY_CAPACITY);
        self.index = 0;
    }

    /// Entry at the paste index, or the system clipboard when the history is
    /// empty. The index does not move.
    pub fn current(&self) -> Option<String> {
        match self.history.get(self.index) {
            Some(text) => Some(text.clone()),
            None => self.system.get(),
        }
    }

    /// Like [`current`](Self::current), then advance the index, wrapping
    /// back to the newest entry.
    pub fn cycle(&mut self) -> Option<String> {
        if self.history.is_empty() {
            return self.system.get();
        }
        let text = self.history.get(self.index).cloned();
        self.index = (self.index + 1) % self.history.len();
        text
    }

    /// Plain copy: system clipboard only, history untouched.
    pub fn set_system(&mut self, text: &str) {
        self.system.set(text);
    }

    pub fn system_text(&self) -> Option<String> {
        self.system.get()
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new(Box::new(MemoryClipboard::default()))
    }
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clipboard")
            .field("history", &self.history)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
