use std::ops::Range;

/// A simple text buffer with line indexing.
///
/// Backed by a plain `String` with a cached line-start index for O(1) line
/// lookups. Offsets are bytes; every public mutation expects offsets on char
/// boundaries and clamps anything past the end.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    text: String,
    /// Byte offsets of the start of each line (including line 0 at offset 0).
    line_starts: Vec<usize>,
}

impl Buffer {
    pub fn new(text: String) -> Self {
        let line_starts = Self::compute_line_starts(&text);
        Self { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_text(&self, line: usize) -> &str {
        let range = self.line_byte_range(line);
        let end = range.end.min(self.text.len());
        let slice = &self.text[range.start..end];
        slice.strip_suffix('\n').unwrap_or(slice)
    }

    /// Byte range of a line including its trailing newline.
    pub fn line_byte_range(&self, line: usize) -> Range<usize> {
        let start = self.line_starts.get(line).copied().unwrap_or(self.text.len());
        let end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.text.len());
        start..end
    }

    /// Offset just before the line's newline (or the end of the text).
    pub fn line_end(&self, line: usize) -> usize {
        let range = self.line_byte_range(line);
        range.start + self.line_text(line).len()
    }

    /// (row, byte column) of an offset.
    pub fn offset_to_point(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        let col = offset - self.line_starts[line];
        (line, col)
    }

    /// Offset of (row, byte column), clamped to the line and snapped back to
    /// a char boundary.
    pub fn point_to_offset(&self, row: usize, col: usize) -> usize {
        if row >= self.line_starts.len() {
            return self.text.len();
        }
        let line_start = self.line_starts[row];
        let offset = (line_start + col).min(self.line_end(row));
        self.floor_boundary(offset)
    }

    pub fn char_to_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn offset_to_char(&self, offset: usize) -> usize {
        let offset = self.floor_boundary(offset.min(self.text.len()));
        self.text[..offset].chars().count()
    }

    /// Offset of the char before `offset`, or 0.
    pub fn prev_boundary(&self, offset: usize) -> usize {
        self.text[..offset.min(self.text.len())]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Offset just past the char at `offset`, or the end of the text.
    pub fn next_boundary(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        self.text[offset..]
            .chars()
            .next()
            .map(|c| offset + c.len_utf8())
            .unwrap_or(self.text.len())
    }

    pub fn floor_boundary(&self, mut offset: usize) -> usize {
        offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(offset..)?.chars().next()
    }

    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = range.start.min(self.text.len());
        let end = range.end.min(self.text.len()).max(start);
        &self.text[start..end]
    }

    /// Insert `text` at `offset`. Only the line starts after `offset` are
    /// touched.
    pub fn insert(&mut self, offset: usize, new_text: &str) {
        if new_text.is_empty() {
            return;
        }
        let offset = offset.min(self.text.len());
        let (row, _) = self.offset_to_point(offset);
        self.text.insert_str(offset, new_text);

        let added = new_text.len();
        for start in &mut self.line_starts[row + 1..] {
            *start += added;
        }
        let new_starts = new_text.match_indices('\n').map(|(i, _)| offset + i + 1);
        self.line_starts.splice(row + 1..row + 1, new_starts);
    }

    /// Delete the byte range and return the removed text.
    pub fn delete(&mut self, range: Range<usize>) -> String {
        let start = range.start.min(self.text.len());
        let end = range.end.min(self.text.len());
        if start >= end {
            return String::new();
        }
        let removed: String = self.text.drain(start..end).collect();

        let removed_len = end - start;
        self.line_starts.retain(|&line_start| line_start <= start || line_start > end);
        for line_start in &mut self.line_starts {
            if *line_start > end {
                *line_start -= removed_len;
            }
        }
        removed
    }

    /// Replace the entire buffer content.
    pub fn set_text(&mut self, text: String) {
        self.line_starts = Self::compute_line_starts(&text);
        self.text = text;
    }

    fn compute_line_starts(text: &str) -> Vec<usize> {
        let mut starts = vec![0];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                starts.push(i + 1);
            }
        }
        starts
    }
}
