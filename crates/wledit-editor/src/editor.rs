use std::ops::Range;
use std::time::Instant;

use crate::buffer::Buffer;
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::history::{Edit, History};
use crate::keymap::{Action, KeyPress, Keymap, Resolution};
use crate::search::{self, Direction, SearchOptions, is_word_char};
use crate::wrap::{self, DEFAULT_WRAP_WIDTH, MAX_WRAP_WIDTH};

pub const DEFAULT_VIEWPORT_LINES: usize = 24;

/// 1-based cursor position as shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line: {}, Col: {}", self.line, self.column)
    }
}

/// Plain-text editing engine: buffer, cursor, selection, undo history,
/// clipboard ring and WordStar keymap.
///
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug)]
pub struct Editor {
    buffer: Buffer,
    cursor: usize,
    anchor: Option<usize>,
    block_mode: bool,
    history: History,
    clipboard: Clipboard,
    keymap: Keymap,
    viewport_lines: usize,
    scroll_top: usize,
    wrap_width: usize,
    modified: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_clipboard(Clipboard::default())
    }

    pub fn with_clipboard(clipboard: Clipboard) -> Self {
        Self {
            buffer: Buffer::default(),
            cursor: 0,
            anchor: None,
            block_mode: false,
            history: History::new(),
            clipboard,
            keymap: Keymap::new(),
            viewport_lines: DEFAULT_VIEWPORT_LINES,
            scroll_top: 0,
            wrap_width: DEFAULT_WRAP_WIDTH,
            modified: false,
        }
    }

    pub fn with_system_clipboard(system: Box<dyn SystemClipboard>) -> Self {
        Self::with_clipboard(Clipboard::new(system))
    }

    // -----------------------------------------------------------------------
    // State
    // -----------------------------------------------------------------------

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Load new content: cursor to the start, history cleared, unmodified.
    pub fn set_text(&mut self, text: String) {
        self.buffer.set_text(text);
        self.cursor = 0;
        self.anchor = None;
        self.block_mode = false;
        self.scroll_top = 0;
        self.history.clear();
        self.keymap.reset();
        self.modified = false;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor as a character index.
    pub fn cursor_char(&self) -> usize {
        self.buffer.offset_to_char(self.cursor)
    }

    /// Move the cursor to a character index. Out-of-range positions are
    /// ignored and reported as `false`.
    pub fn set_cursor_char(&mut self, char_index: usize) -> bool {
        if char_index > self.buffer.char_count() {
            return false;
        }
        let offset = self.buffer.char_to_offset(char_index);
        self.move_to(offset);
        true
    }

    pub fn position(&self) -> Position {
        let (row, _) = self.buffer.offset_to_point(self.cursor);
        Position {
            line: row + 1,
            column: self.column_chars() + 1,
        }
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
        self.history.seal();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        let range = anchor.min(self.cursor)..anchor.max(self.cursor);
        (!range.is_empty() || self.block_mode).then_some(range)
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selection().map(|range| self.buffer.slice(range))
    }

    pub fn is_block_mode(&self) -> bool {
        self.block_mode
    }

    /// Select `range`, leaving the cursor at its end.
    pub fn select(&mut self, range: Range<usize>) {
        let start = self.buffer.floor_boundary(range.start);
        let end = self.buffer.floor_boundary(range.end);
        self.block_mode = false;
        self.anchor = Some(start);
        self.cursor = end;
        self.ensure_cursor_visible();
    }

    pub fn select_all(&mut self) {
        self.select(0..self.buffer.len());
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
        self.block_mode = false;
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Insert at the cursor, replacing the selection if there is one.
    pub fn insert_text(&mut self, text: &str) {
        match self.plain_selection() {
            Some(range) => self.replace_range(range, text),
            None if text.is_empty() => {}
            None => self.replace_range(self.cursor..self.cursor, text),
        }
    }

    /// Delete the selection, or the character before the cursor.
    pub fn backspace(&mut self) {
        if let Some(range) = self.plain_selection() {
            self.replace_range(range, "");
        } else if self.cursor > 0 {
            let prev = self.buffer.prev_boundary(self.cursor);
            self.replace_range(prev..self.cursor, "");
        }
    }

    /// Delete the selection, or the character after the cursor.
    pub fn delete_forward(&mut self) {
        if let Some(range) = self.plain_selection() {
            self.replace_range(range, "");
        } else if self.cursor < self.buffer.len() {
            let next = self.buffer.next_boundary(self.cursor);
            self.replace_range(self.cursor..next, "");
        }
    }

    /// Delete up to the end of the word at or after the cursor.
    pub fn delete_word_right(&mut self) {
        let end = self.word_end_after(self.cursor);
        if end > self.cursor {
            self.replace_range(self.cursor..end, "");
        }
    }

    pub fn delete_to_line_end(&mut self) {
        let (row, _) = self.buffer.offset_to_point(self.cursor);
        let end = self.buffer.line_end(row);
        if end > self.cursor {
            self.replace_range(self.cursor..end, "");
        }
    }

    /// Remove the cursor line including its newline; the line text goes to
    /// the clipboard history.
    pub fn delete_line(&mut self) {
        let (row, _) = self.buffer.offset_to_point(self.cursor);
        let line = self.buffer.line_text(row).to_string();
        let range = self.buffer.line_byte_range(row);
        self.clipboard.push_history(line);
        self.anchor = None;
        self.block_mode = false;
        if !range.is_empty() {
            self.replace_range(range, "");
        } else {
            self.cursor = range.start;
        }
    }

    pub fn undo(&mut self) -> bool {
        let Some(edit) = self.history.pop_undo() else {
            return false;
        };
        let end = edit.offset + edit.inserted.len();
        self.buffer.delete(edit.offset..end);
        self.buffer.insert(edit.offset, &edit.deleted);
        self.after_history_step(edit.cursor_before);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(edit) = self.history.pop_redo() else {
            return false;
        };
        let end = edit.offset + edit.deleted.len();
        self.buffer.delete(edit.offset..end);
        self.buffer.insert(edit.offset, &edit.inserted);
        self.after_history_step(edit.cursor_after);
        true
    }

    fn after_history_step(&mut self, cursor: usize) {
        self.cursor = self.buffer.floor_boundary(cursor);
        self.anchor = None;
        self.block_mode = false;
        self.modified = true;
        self.ensure_cursor_visible();
    }

    fn replace_range(&mut self, range: Range<usize>, text: &str) {
        let cursor_before = self.cursor;
        let deleted = self.buffer.delete(range.clone());
        self.buffer.insert(range.start, text);
        self.cursor = range.start + text.len();
        // A marked block survives edits; its anchor follows the text.
        self.anchor = match self.anchor {
            Some(anchor) if self.block_mode => Some(shift_anchor(anchor, &range, text.len())),
            _ => None,
        };
        self.modified = true;
        self.history.record(Edit {
            offset: range.start,
            deleted,
            inserted: text.to_string(),
            cursor_before,
            cursor_after: self.cursor,
        });
        self.ensure_cursor_visible();
    }

    /// A selection that edits should replace. Block mode marks text for
    /// `^KK`/`^KY` and does not make typing overwrite it.
    fn plain_selection(&self) -> Option<Range<usize>> {
        if self.block_mode {
            return None;
        }
        self.selection().filter(|range| !range.is_empty())
    }

    // -----------------------------------------------------------------------
    // Clipboard
    // -----------------------------------------------------------------------

    /// Copy the selection to the system clipboard. The clipboard history is
    /// left alone.
    pub fn copy(&mut self) -> bool {
        match self.marked_range() {
            Some(range) => {
                let text = self.buffer.slice(range).to_string();
                self.clipboard.set_system(&text);
                true
            }
            None => false,
        }
    }

    pub fn cut(&mut self) -> bool {
        match self.marked_range() {
            Some(range) => {
                let text = self.buffer.slice(range.clone()).to_string();
                self.clipboard.set_system(&text);
                self.replace_range(range, "");
                self.clear_selection();
                true
            }
            None => false,
        }
    }

    /// Insert the system clipboard text, replacing a plain selection.
    pub fn paste(&mut self) -> bool {
        match self.clipboard.system_text() {
            Some(text) if !text.is_empty() => {
                self.insert_text(&text);
                true
            }
            _ => false,
        }
    }

    fn marked_range(&self) -> Option<Range<usize>> {
        self.selection().filter(|range| !range.is_empty())
    }

    pub fn block_begin(&mut self) {
        self.anchor = Some(self.cursor);
        self.block_mode = true;
    }

    /// Copy the marked block into the clipboard ring; the text stays.
    pub fn block_copy(&mut self) {
        if let Some(range) = self.block_range() {
            let text = self.buffer.slice(range).to_string();
            self.clipboard.push(text);
        }
        self.clear_selection();
    }

    /// Cut the marked block, or delete the cursor line when no block is
    /// marked.
    pub fn block_cut_or_delete_line(&mut self) {
        if !self.block_mode {
            self.delete_line();
            return;
        }
        match self.block_range() {
            Some(range) => {
                let text = self.buffer.slice(range.clone()).to_string();
                self.clipboard.push(text);
                self.replace_range(range, "");
                self.clear_selection();
            }
            None => self.clear_selection(),
        }
    }

    pub fn paste_current(&mut self) {
        if let Some(text) = self.clipboard.current() {
            self.insert_text(&text);
        }
    }

    pub fn paste_cycle(&mut self) {
        if let Some(text) = self.clipboard.cycle() {
            self.insert_text(&text);
        }
    }

    fn block_range(&self) -> Option<Range<usize>> {
        if !self.block_mode {
            return None;
        }
        self.marked_range()
    }

    // -----------------------------------------------------------------------
    // Motion
    // -----------------------------------------------------------------------

    fn move_to(&mut self, offset: usize) {
        if !self.block_mode {
            self.anchor = None;
        }
        self.cursor = self.buffer.floor_boundary(offset);
        self.history.seal();
        self.ensure_cursor_visible();
    }

    pub fn move_left(&mut self) {
        self.move_to(self.buffer.prev_boundary(self.cursor));
    }

    pub fn move_right(&mut self) {
        self.move_to(self.buffer.next_boundary(self.cursor));
    }

    pub fn move_up(&mut self) {
        self.move_lines(-1);
    }

    pub fn move_down(&mut self) {
        self.move_lines(1);
    }

    pub fn page_up(&mut self) {
        self.move_lines(-(self.page_step() as isize));
    }

    pub fn page_down(&mut self) {
        self.move_lines(self.page_step() as isize);
    }

    fn page_step(&self) -> usize {
        self.viewport_lines.saturating_sub(1).max(1)
    }

    fn move_lines(&mut self, delta: isize) {
        let (row, _) = self.buffer.offset_to_point(self.cursor);
        let last = self.buffer.line_count() - 1;
        let target = row.saturating_add_signed(delta).min(last);
        if target == row {
            return;
        }
        let column = self.column_chars();
        let offset = self.offset_at_column(target, column);
        self.move_to(offset);
    }

    pub fn word_left(&mut self) {
        let text = self.buffer.text();
        let mut offset = self.cursor;
        while let Some((i, c)) = text[..offset].char_indices().next_back() {
            if is_word_char(c) {
                break;
            }
            offset = i;
        }
        while let Some((i, c)) = text[..offset].char_indices().next_back() {
            if !is_word_char(c) {
                break;
            }
            offset = i;
        }
        self.move_to(offset);
    }

    pub fn word_right(&mut self) {
        let mut offset = self.cursor;
        while let Some(c) = self.buffer.char_at(offset).filter(|c| is_word_char(*c)) {
            offset += c.len_utf8();
        }
        while let Some(c) = self.buffer.char_at(offset).filter(|c| !is_word_char(*c)) {
            offset += c.len_utf8();
        }
        self.move_to(offset);
    }

    fn word_end_after(&self, mut offset: usize) -> usize {
        while let Some(c) = self.buffer.char_at(offset).filter(|c| !is_word_char(*c)) {
            offset += c.len_utf8();
        }
        while let Some(c) = self.buffer.char_at(offset).filter(|c| is_word_char(*c)) {
            offset += c.len_utf8();
        }
        offset
    }

    pub fn line_start(&mut self) {
        let (row, _) = self.buffer.offset_to_point(self.cursor);
        self.move_to(self.buffer.line_byte_range(row).start);
    }

    pub fn line_end(&mut self) {
        let (row, _) = self.buffer.offset_to_point(self.cursor);
        self.move_to(self.buffer.line_end(row));
    }

    pub fn doc_start(&mut self) {
        self.move_to(0);
    }

    pub fn doc_end(&mut self) {
        self.move_to(self.buffer.len());
    }

    pub fn screen_top(&mut self) {
        self.move_to(self.buffer.line_byte_range(self.scroll_top).start);
    }

    pub fn screen_bottom(&mut self) {
        let last = self.buffer.line_count() - 1;
        let row = (self.scroll_top + self.viewport_lines - 1).min(last);
        self.move_to(self.buffer.line_byte_range(row).start);
    }

    fn column_chars(&self) -> usize {
        let (row, _) = self.buffer.offset_to_point(self.cursor);
        let start = self.buffer.line_byte_range(row).start;
        self.buffer.slice(start..self.cursor).chars().count()
    }

    fn offset_at_column(&self, row: usize, column: usize) -> usize {
        let start = self.buffer.line_byte_range(row).start;
        let line = self.buffer.line_text(row);
        start
            + line
                .char_indices()
                .nth(column)
                .map(|(i, _)| i)
                .unwrap_or(line.len())
    }

    // -----------------------------------------------------------------------
    // Viewport and wrapping
    // -----------------------------------------------------------------------

    pub fn viewport_lines(&self) -> usize {
        self.viewport_lines
    }

    pub fn set_viewport_lines(&mut self, lines: usize) {
        self.viewport_lines = lines.max(1);
        self.ensure_cursor_visible();
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    fn ensure_cursor_visible(&mut self) {
        let (row, _) = self.buffer.offset_to_point(self.cursor);
        if row < self.scroll_top {
            self.scroll_top = row;
        } else if row >= self.scroll_top + self.viewport_lines {
            self.scroll_top = row + 1 - self.viewport_lines;
        }
    }

    pub fn wrap_width(&self) -> usize {
        self.wrap_width
    }

    /// Set the wrap column; `0` disables wrapping. Clamped to the widest
    /// supported width.
    pub fn set_wrap_width(&mut self, width: usize) {
        self.wrap_width = width.min(MAX_WRAP_WIDTH);
    }

    /// Rows as displayed with the current wrap width.
    pub fn display_lines(&self) -> Vec<&str> {
        (0..self.buffer.line_count())
            .flat_map(|row| {
                let line = self.buffer.line_text(row);
                wrap::wrap_line(line, self.wrap_width)
                    .into_iter()
                    .map(move |range| &line[range])
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Select the next match in `direction`. Forward searches start after the
    /// selection, backward ones before it. Returns whether a match was found.
    pub fn find(&mut self, needle: &str, direction: Direction, options: SearchOptions) -> bool {
        let from = match (self.plain_selection(), direction) {
            (Some(range), Direction::Forward) => range.end,
            (Some(range), Direction::Backward) => range.start,
            (None, _) => self.cursor,
        };
        match search::find(self.buffer.text(), needle, from, direction, options) {
            Some(range) => {
                log::debug!("match for {:?} at {:?}", needle, range);
                self.select(range);
                true
            }
            None => false,
        }
    }

    /// Replace the current selection if it is exactly `needle`, then move to
    /// the next match.
    pub fn replace(&mut self, needle: &str, replacement: &str, options: SearchOptions) -> bool {
        if needle.is_empty() {
            return false;
        }
        if self.selected_text() == Some(needle) && !self.block_mode {
            self.insert_text(replacement);
        }
        self.find(needle, Direction::Forward, options)
    }

    /// Replace every match from the start of the document. Returns the count.
    pub fn replace_all(&mut self, needle: &str, replacement: &str, options: SearchOptions) -> usize {
        let matches = search::find_all(self.buffer.text(), needle, options);
        let (Some(first), Some(last)) = (matches.first(), matches.last()) else {
            return 0;
        };
        let span = first.start..last.end;

        // Rebuild only the span that holds matches; it becomes one undo step.
        let text = self.buffer.text();
        let mut replaced = String::with_capacity(span.len());
        let mut copied = span.start;
        for range in &matches {
            replaced.push_str(&text[copied..range.start]);
            replaced.push_str(replacement);
            copied = range.end;
        }

        self.clear_selection();
        self.replace_range(span, &replaced);
        log::info!("replaced {} occurrences of {:?}", matches.len(), needle);
        matches.len()
    }

    // -----------------------------------------------------------------------
    // Keys
    // -----------------------------------------------------------------------

    /// Feed one keystroke through the WordStar keymap. Returns whether the key
    /// was consumed.
    pub fn handle_key(&mut self, press: KeyPress, now: Instant) -> bool {
        match self.keymap.resolve(press, now) {
            Resolution::Action(action) => {
                self.apply(action);
                true
            }
            Resolution::Pending(prefix) => {
                log::debug!("waiting for second key after ^{:?}", prefix);
                true
            }
            Resolution::Consumed => true,
            Resolution::Unbound => false,
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Insert(text) => self.insert_text(&text),
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::MoveUp => self.move_up(),
            Action::MoveDown => self.move_down(),
            Action::WordLeft => self.word_left(),
            Action::WordRight => self.word_right(),
            Action::LineStart => self.line_start(),
            Action::LineEnd => self.line_end(),
            Action::DocStart => self.doc_start(),
            Action::DocEnd => self.doc_end(),
            Action::PageUp => self.page_up(),
            Action::PageDown => self.page_down(),
            Action::ScreenTop => self.screen_top(),
            Action::ScreenBottom => self.screen_bottom(),
            Action::Backspace => self.backspace(),
            Action::DeleteForward => self.delete_forward(),
            Action::DeleteWordRight => self.delete_word_right(),
            Action::DeleteToLineEnd => self.delete_to_line_end(),
            Action::BlockBegin => self.block_begin(),
            Action::BlockCopy => self.block_copy(),
            Action::BlockCutOrDeleteLine => self.block_cut_or_delete_line(),
            Action::PasteCurrent => self.paste_current(),
            Action::PasteCycle => self.paste_cycle(),
            Action::SelectAll => self.select_all(),
            Action::Copy => {
                self.copy();
            }
            Action::Cut => {
                self.cut();
            }
            Action::Paste => {
                self.paste();
            }
        }
    }
}

/// Where a block anchor lands after `range` is replaced by `inserted` bytes.
fn shift_anchor(anchor: usize, range: &Range<usize>, inserted: usize) -> usize {
    if range.start >= anchor {
        anchor
    } else if range.end <= anchor {
        anchor - range.len() + inserted
    } else {
        range.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::Key;
    use std::sync::{Arc, Mutex};

    /// System clipboard the test can inspect after handing it to the editor.
    #[derive(Clone, Default)]
    struct SharedClipboard(Arc<Mutex<Option<String>>>);

    impl SystemClipboard for SharedClipboard {
        fn get(&self) -> Option<String> {
            self.0.lock().unwrap().clone()
        }

        fn set(&mut self, text: &str) {
            *self.0.lock().unwrap() = Some(text.to_string());
        }
    }

    fn editor(text: &str) -> Editor {
        let mut editor = Editor::new();
        editor.set_text(text.to_string());
        editor
    }

    fn keys(editor: &mut Editor, presses: &[KeyPress]) {
        let now = Instant::now();
        for press in presses {
            editor.handle_key(*press, now);
        }
    }

    #[test]
    fn insert_advances_cursor() {
        let mut editor = Editor::new();
        editor.insert_text("hello");
        editor.insert_text(" world");
        assert_eq!(editor.text(), "hello world");
        assert_eq!(editor.cursor_char(), 11);
        assert!(editor.is_modified());
    }

    #[test]
    fn insert_empty_is_noop() {
        let mut editor = Editor::new();
        editor.insert_text("");
        assert!(!editor.is_modified());
        assert!(!editor.can_undo());
    }

    #[test]
    fn backspace_removes_whole_char() {
        let mut editor = Editor::new();
        editor.insert_text("aé日");
        editor.backspace();
        assert_eq!(editor.text(), "aé");
        editor.backspace();
        editor.backspace();
        assert_eq!(editor.text(), "");
        editor.backspace();
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn backspace_at_cursor_mid_text() {
        let mut editor = editor("abcd");
        assert!(editor.set_cursor_char(2));
        editor.backspace();
        assert_eq!(editor.text(), "acd");
        assert_eq!(editor.cursor_char(), 1);
    }

    #[test]
    fn set_cursor_out_of_range_is_ignored() {
        let mut editor = editor("abc");
        assert!(editor.set_cursor_char(3));
        assert!(!editor.set_cursor_char(4));
        assert_eq!(editor.cursor_char(), 3);
    }

    #[test]
    fn undo_redo_typing_group() {
        let mut editor = Editor::new();
        for c in "abc".chars() {
            editor.insert_text(&c.to_string());
        }
        editor.insert_text("\n");
        assert!(editor.undo());
        assert_eq!(editor.text(), "abc");
        assert!(editor.undo());
        assert_eq!(editor.text(), "");
        assert!(!editor.undo());
        assert!(editor.redo());
        assert_eq!(editor.text(), "abc");
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn position_is_one_based_in_chars() {
        let mut editor = editor("first\n日本語です");
        editor.doc_end();
        assert_eq!(editor.position(), Position { line: 2, column: 6 });
        assert_eq!(editor.position().to_string(), "Line: 2, Col: 6");
    }

    #[test]
    fn vertical_motion_keeps_char_column() {
        let mut editor = editor("abcdef\nあい\nxyz");
        editor.set_cursor_char(2);
        editor.move_down();
        assert_eq!(editor.position(), Position { line: 2, column: 3 });
        editor.move_down();
        assert_eq!(editor.position(), Position { line: 3, column: 3 });
        editor.move_up();
        editor.move_up();
        assert_eq!(editor.position(), Position { line: 1, column: 3 });
    }

    #[test]
    fn word_motion() {
        let mut editor = editor("one two  three");
        editor.word_right();
        assert_eq!(editor.cursor(), 4);
        editor.word_right();
        assert_eq!(editor.cursor(), 9);
        editor.word_left();
        assert_eq!(editor.cursor(), 4);
        editor.word_left();
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn wordstar_diamond_moves_cursor() {
        let mut editor = editor("ab\ncd");
        keys(
            &mut editor,
            &[KeyPress::ctrl('d'), KeyPress::ctrl('x'), KeyPress::ctrl('s')],
        );
        assert_eq!(editor.position(), Position { line: 2, column: 1 });
        keys(&mut editor, &[KeyPress::ctrl('e')]);
        assert_eq!(editor.position(), Position { line: 1, column: 1 });
    }

    #[test]
    fn ctrl_t_deletes_word_right() {
        let mut editor = editor("hello world");
        editor.set_cursor_char(5);
        keys(&mut editor, &[KeyPress::ctrl('t')]);
        assert_eq!(editor.text(), "hello");
    }

    #[test]
    fn ctrl_y_deletes_to_line_end() {
        let mut editor = editor("keep this\nnext");
        editor.set_cursor_char(4);
        keys(&mut editor, &[KeyPress::ctrl('y')]);
        assert_eq!(editor.text(), "keep\nnext");
    }

    #[test]
    fn quick_motions() {
        let mut editor = editor("abc\ndef\nghi");
        keys(&mut editor, &[KeyPress::ctrl('q'), KeyPress::ctrl('c')]);
        assert_eq!(editor.cursor(), editor.text().len());
        keys(&mut editor, &[KeyPress::ctrl('q'), KeyPress::ctrl('s')]);
        assert_eq!(editor.position(), Position { line: 3, column: 1 });
        keys(&mut editor, &[KeyPress::ctrl('q'), KeyPress::ctrl('d')]);
        assert_eq!(editor.position(), Position { line: 3, column: 4 });
        keys(&mut editor, &[KeyPress::ctrl('q'), KeyPress::ctrl('r')]);
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn page_and_screen_motions() {
        let text = (1..=50).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let mut editor = editor(&text);
        editor.set_viewport_lines(10);

        editor.page_down();
        assert_eq!(editor.position().line, 10);
        editor.page_down();
        assert_eq!(editor.position().line, 19);
        assert_eq!(editor.scroll_top(), 9);

        editor.screen_top();
        assert_eq!(editor.position().line, 10);
        editor.screen_bottom();
        assert_eq!(editor.position().line, 19);

        editor.page_up();
        assert_eq!(editor.position().line, 10);
    }

    #[test]
    fn block_copy_keeps_text_and_fills_history() {
        let mut editor = editor("hello world");
        keys(&mut editor, &[KeyPress::ctrl('k'), KeyPress::ctrl('b')]);
        assert!(editor.is_block_mode());
        for _ in 0..5 {
            keys(&mut editor, &[KeyPress::ctrl('d')]);
        }
        assert_eq!(editor.selected_text(), Some("hello"));
        keys(&mut editor, &[KeyPress::ctrl('k'), KeyPress::ctrl('k')]);

        assert_eq!(editor.text(), "hello world");
        assert!(!editor.is_block_mode());
        assert_eq!(editor.clipboard().history().next(), Some("hello"));
        assert_eq!(editor.clipboard().system_text().as_deref(), Some("hello"));

        keys(&mut editor, &[KeyPress::ctrl('q'), KeyPress::ctrl('d')]);
        keys(&mut editor, &[KeyPress::ctrl('k'), KeyPress::ctrl('c')]);
        assert_eq!(editor.text(), "hello worldhello");
    }

    #[test]
    fn block_cut_removes_text() {
        let mut editor = editor("abcdef");
        editor.set_cursor_char(1);
        editor.block_begin();
        editor.set_cursor_char(4);
        editor.block_cut_or_delete_line();
        assert_eq!(editor.text(), "aef");
        assert_eq!(editor.cursor_char(), 1);
        assert_eq!(editor.clipboard().history().next(), Some("bcd"));
    }

    #[test]
    fn ctrl_k_y_without_block_deletes_line() {
        let mut editor = editor("first\nsecond\nthird");
        editor.move_down();
        keys(&mut editor, &[KeyPress::ctrl('k'), KeyPress::ctrl('y')]);
        assert_eq!(editor.text(), "first\nthird");
        assert_eq!(editor.position(), Position { line: 2, column: 1 });
        assert_eq!(editor.clipboard().history().next(), Some("second"));
        assert!(editor.clipboard().system_text().is_none());
    }

    #[test]
    fn paste_cycle_walks_history() {
        let mut editor = Editor::new();
        editor.clipboard.push("one".into());
        editor.clipboard.push("two".into());
        editor.paste_cycle();
        editor.paste_cycle();
        editor.paste_cycle();
        assert_eq!(editor.text(), "twoonetwo");
    }

    #[test]
    fn typing_replaces_find_selection() {
        let mut editor = editor("say hello");
        assert!(editor.find("hello", Direction::Forward, SearchOptions::default()));
        editor.insert_text("bye");
        assert_eq!(editor.text(), "say bye");
    }

    #[test]
    fn find_next_and_previous() {
        let mut editor = editor("foo bar foo bar");
        let options = SearchOptions::default();
        assert!(editor.find("bar", Direction::Forward, options));
        assert_eq!(editor.selection(), Some(4..7));
        assert!(editor.find("bar", Direction::Forward, options));
        assert_eq!(editor.selection(), Some(12..15));
        assert!(!editor.find("bar", Direction::Forward, options));
        assert!(editor.find("bar", Direction::Backward, options));
        assert_eq!(editor.selection(), Some(4..7));
    }

    #[test]
    fn replace_only_when_selection_matches() {
        let mut editor = editor("a b a");
        let options = SearchOptions::default();
        // Nothing selected yet: just finds the first match.
        assert!(editor.replace("a", "x", options));
        assert_eq!(editor.text(), "a b a");
        assert!(editor.replace("a", "x", options));
        assert_eq!(editor.text(), "x b a");
        assert_eq!(editor.selection(), Some(4..5));
    }

    #[test]
    fn replace_all_counts_and_is_one_pass() {
        let mut editor = editor("aaa");
        let count = editor.replace_all("a", "aa", SearchOptions::default());
        assert_eq!(count, 3);
        assert_eq!(editor.text(), "aaaaaa");
    }

    #[test]
    fn replace_all_with_options() {
        let mut editor = editor("Cat cat concat CAT");
        let options = SearchOptions {
            case_sensitive: false,
            whole_word: true,
        };
        assert_eq!(editor.replace_all("cat", "dog", options), 3);
        assert_eq!(editor.text(), "dog dog concat dog");
    }

    #[test]
    fn display_lines_follow_wrap_width() {
        let mut editor = editor("hello world\nshort");
        editor.set_wrap_width(6);
        assert_eq!(editor.display_lines(), vec!["hello ", "world", "short"]);
        editor.set_wrap_width(0);
        assert_eq!(editor.display_lines(), vec!["hello world", "short"]);
        editor.set_wrap_width(500);
        assert_eq!(editor.wrap_width(), MAX_WRAP_WIDTH);
    }

    #[test]
    fn plain_keys_edit_text() {
        let mut editor = Editor::new();
        keys(
            &mut editor,
            &[
                KeyPress::plain(Key::Char('h')),
                KeyPress::plain(Key::Char('i')),
                KeyPress::plain(Key::Enter),
                KeyPress::plain(Key::Char('x')),
                KeyPress::plain(Key::Backspace),
            ],
        );
        assert_eq!(editor.text(), "hi\n");
        assert!(!editor.handle_key(KeyPress::plain(Key::Escape), Instant::now()));
    }

    #[test]
    fn mark_saved_clears_modified() {
        let mut editor = Editor::new();
        editor.insert_text("x");
        editor.mark_saved();
        assert!(!editor.is_modified());
        editor.undo();
        assert!(editor.is_modified());
    }

    #[test]
    fn block_survives_typing() {
        let mut editor = Editor::new();
        keys(
            &mut editor,
            &[
                KeyPress::ctrl('k'),
                KeyPress::ctrl('b'),
                KeyPress::plain(Key::Char('a')),
                KeyPress::plain(Key::Char('b')),
                KeyPress::plain(Key::Char('c')),
            ],
        );
        assert!(editor.is_block_mode());
        keys(&mut editor, &[KeyPress::ctrl('k'), KeyPress::ctrl('k')]);

        assert_eq!(editor.text(), "abc");
        assert_eq!(editor.clipboard().history().next(), Some("abc"));
        assert!(!editor.is_block_mode());
    }

    #[test]
    fn block_anchor_follows_edits_before_it() {
        let mut editor = editor("hello world");
        editor.set_cursor_char(6);
        editor.block_begin();
        editor.doc_end();
        editor.doc_start();
        editor.insert_text("big ");
        editor.doc_end();
        assert_eq!(editor.selected_text(), Some("world"));

        editor.block_copy();
        assert_eq!(editor.clipboard().history().next(), Some("world"));
    }

    #[test]
    fn replace_all_on_large_text_is_one_undo_step() {
        let original = "ab ".repeat(40_000);
        let mut editor = editor(&original);
        let count = editor.replace_all("ab", "xy", SearchOptions::default());

        assert_eq!(count, 40_000);
        assert_eq!(editor.text(), "xy ".repeat(40_000));
        assert_eq!(editor.buffer().line_count(), 1);
        assert!(editor.undo());
        assert_eq!(editor.text(), original);
        assert!(!editor.can_undo());
    }

    #[test]
    fn copy_and_cut_use_system_clipboard_only() {
        let system = SharedClipboard::default();
        let mut editor = Editor::with_system_clipboard(Box::new(system.clone()));
        editor.set_text("hello world".to_string());

        editor.select(0..5);
        assert!(editor.copy());
        assert_eq!(system.get().as_deref(), Some("hello"));
        assert_eq!(editor.text(), "hello world");

        editor.select(5..11);
        editor.apply(Action::Cut);
        assert_eq!(editor.text(), "hello");
        assert_eq!(system.get().as_deref(), Some(" world"));
        assert!(editor.clipboard().is_empty());

        keys(&mut editor, &[KeyPress::plain(Key::Paste)]);
        assert_eq!(editor.text(), "hello world");
        assert!(editor.clipboard().is_empty());
    }

    #[test]
    fn copy_without_selection_does_nothing() {
        let system = SharedClipboard::default();
        let mut editor = Editor::with_system_clipboard(Box::new(system.clone()));
        editor.set_text("abc".to_string());
        assert!(!editor.copy());
        assert!(!editor.cut());
        assert_eq!(system.get(), None);
    }

    #[test]
    fn select_all_then_type_replaces_everything() {
        let mut editor = editor("old text");
        editor.apply(Action::SelectAll);
        assert_eq!(editor.selection(), Some(0..8));
        editor.insert_text("new");
        assert_eq!(editor.text(), "new");
    }

    #[test]
    fn paste_current_falls_back_to_system_clipboard() {
        let system = SharedClipboard::default();
        *system.0.lock().unwrap() = Some("from host".to_string());
        let mut editor = Editor::with_system_clipboard(Box::new(system));

        keys(&mut editor, &[KeyPress::ctrl('k'), KeyPress::ctrl('c')]);
        assert_eq!(editor.text(), "from host");
        keys(&mut editor, &[KeyPress::ctrl('k'), KeyPress::ctrl('v')]);
        assert_eq!(editor.text(), "from hostfrom host");
    }

    #[test]
    fn ctrl_g_and_delete_key_delete_forward() {
        let mut editor = editor("abc");
        keys(&mut editor, &[KeyPress::ctrl('g')]);
        assert_eq!(editor.text(), "bc");
        keys(&mut editor, &[KeyPress::plain(Key::Delete)]);
        assert_eq!(editor.text(), "c");
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn ctrl_a_and_f_move_by_word() {
        let mut editor = editor("one two three");
        keys(&mut editor, &[KeyPress::ctrl('f')]);
        assert_eq!(editor.cursor(), 4);
        keys(&mut editor, &[KeyPress::ctrl('f')]);
        assert_eq!(editor.cursor(), 8);
        keys(&mut editor, &[KeyPress::ctrl('a')]);
        assert_eq!(editor.cursor(), 4);
    }

    #[test]
    fn quick_screen_top_and_bottom() {
        let text = (1..=50).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let mut editor = editor(&text);
        editor.set_viewport_lines(10);
        editor.page_down();
        editor.page_down();
        assert_eq!(editor.scroll_top(), 9);

        keys(&mut editor, &[KeyPress::ctrl('q'), KeyPress::ctrl('e')]);
        assert_eq!(editor.position().line, 10);
        keys(&mut editor, &[KeyPress::ctrl('q'), KeyPress::ctrl('x')]);
        assert_eq!(editor.position().line, 19);
    }

    #[test]
    fn undo_restores_block_cut() {
        let mut editor = editor("abcdef");
        editor.set_cursor_char(1);
        keys(&mut editor, &[KeyPress::ctrl('k'), KeyPress::ctrl('b')]);
        keys(
            &mut editor,
            &[KeyPress::ctrl('d'), KeyPress::ctrl('d'), KeyPress::ctrl('d')],
        );
        keys(&mut editor, &[KeyPress::ctrl('k'), KeyPress::ctrl('y')]);
        assert_eq!(editor.text(), "aef");

        assert!(editor.undo());
        assert_eq!(editor.text(), "abcdef");
        assert_eq!(editor.cursor_char(), 4);
    }
}
