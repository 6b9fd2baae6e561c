use std::ops::Range;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub whole_word: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Find the first match of `needle` starting at or after `from` (forward) or
/// ending at or before `from` (backward). Returns a byte range.
pub fn find(
    haystack: &str,
    needle: &str,
    from: usize,
    direction: Direction,
    options: SearchOptions,
) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    let mut from = from.min(haystack.len());
    while !haystack.is_char_boundary(from) {
        from -= 1;
    }
    match direction {
        Direction::Forward => haystack[from..]
            .char_indices()
            .map(|(i, _)| from + i)
            .find_map(|start| match_at(haystack, needle, start, options)),
        Direction::Backward => haystack[..from]
            .char_indices()
            .rev()
            .filter_map(|(start, _)| match_at(haystack, needle, start, options))
            .find(|range| range.end <= from),
    }
}

/// Every non-overlapping forward match.
pub fn find_all(haystack: &str, needle: &str, options: SearchOptions) -> Vec<Range<usize>> {
    let mut matches = Vec::new();
    let mut from = 0;
    while let Some(range) = find(haystack, needle, from, Direction::Forward, options) {
        from = range.end;
        matches.push(range);
    }
    matches
}

fn match_at(
    haystack: &str,
    needle: &str,
    start: usize,
    options: SearchOptions,
) -> Option<Range<usize>> {
    let rest = &haystack[start..];
    let len = if options.case_sensitive {
        rest.starts_with(needle).then_some(needle.len())?
    } else {
        caseless_prefix_len(rest, needle)?
    };
    let range = start..start + len;
    if options.whole_word && !on_word_boundaries(haystack, &range) {
        return None;
    }
    Some(range)
}

/// Byte length of the prefix of `text` that matches `needle` ignoring case.
fn caseless_prefix_len(text: &str, needle: &str) -> Option<usize> {
    let mut text_chars = text.char_indices();
    for n in needle.chars() {
        let (_, t) = text_chars.next()?;
        if !t.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
    }
    Some(text_chars.next().map(|(i, _)| i).unwrap_or(text.len()))
}

fn on_word_boundaries(haystack: &str, range: &Range<usize>) -> bool {
    let before = haystack[..range.start].chars().next_back();
    let after = haystack[range.end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}
