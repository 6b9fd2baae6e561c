use std::collections::VecDeque;

/// Undo steps kept before the oldest are dropped.
pub const UNDO_LIMIT: usize = 1000;

/// A single reversible change to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub offset: usize,
    pub deleted: String,
    pub inserted: String,
    pub cursor_before: usize,
    pub cursor_after: usize,
}

impl Edit {
    /// One typed character (not a newline) with nothing deleted.
    fn is_keystroke(&self) -> bool {
        self.deleted.is_empty() && self.inserted.chars().count() == 1 && self.inserted != "\n"
    }
}

/// Undo/redo stacks.
#[derive(Debug, Default)]
pub struct History {
    undo: VecDeque<Edit>,
    redo: Vec<Edit>,
    /// Set after undo/redo or an explicit break so the next insert starts a
    /// new group.
    sealed: bool,
    /// The newest undo entry is a run of keystrokes.
    typing: bool,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, edit: Edit) {
        self.redo.clear();
        let keystroke = edit.is_keystroke();
        if keystroke && self.typing && !self.sealed {
            if let Some(last) = self.undo.back_mut() {
                if edit.offset == last.offset + last.inserted.len() {
                    last.inserted.push_str(&edit.inserted);
                    last.cursor_after = edit.cursor_after;
                    return;
                }
            }
        }
        self.sealed = false;
        self.typing = keystroke;
        self.undo.push_back(edit);
        if self.undo.len() > UNDO_LIMIT {
            self.undo.pop_front();
        }
    }

    /// Stop coalescing into the current group.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn pop_undo(&mut self) -> Option<Edit> {
        let edit = self.undo.pop_back()?;
        self.redo.push(edit.clone());
        self.sealed = true;
        Some(edit)
    }

    pub fn pop_redo(&mut self) -> Option<Edit> {
        let edit = self.redo.pop()?;
        self.undo.push_back(edit.clone());
        self.sealed = true;
        Some(edit)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.sealed = false;
        self.typing = false;
    }
}
