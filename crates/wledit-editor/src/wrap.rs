use std::ops::Range;

/// Widest wrap accepted from settings; `0` turns wrapping off.
pub const MAX_WRAP_WIDTH: usize = 200;
pub const DEFAULT_WRAP_WIDTH: usize = 80;

/// Split one logical line (without its newline) into display rows of at most
/// `width` chars. Breaks after the last whitespace that fits, or mid-word when
/// a word is longer than the row. Returned ranges are byte ranges into `line`.
pub fn wrap_line(line: &str, width: usize) -> Vec<Range<usize>> {
    if width == 0 || line.chars().count() <= width {
        return vec![0..line.len()];
    }

    let mut rows = Vec::new();
    let mut row_start = 0;
    let mut chars_in_row = 0;
    // Byte offset just past the last whitespace seen in the current row.
    let mut last_break: Option<usize> = None;

    for (i, c) in line.char_indices() {
        if chars_in_row == width {
            let split = last_break.unwrap_or(i);
            rows.push(row_start..split);
            chars_in_row = line[split..i].chars().count();
            row_start = split;
            last_break = None;
        }
        chars_in_row += 1;
        if c.is_whitespace() {
            last_break = Some(i + c.len_utf8());
        }
    }
    rows.push(row_start..line.len());
    rows
}
