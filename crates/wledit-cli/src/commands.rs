use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use wledit_editor::{Buffer, Document, Position, SearchOptions, find_all};
use wledit_fs::{Filesystem, LocalFs};

use crate::script;

fn local_fs() -> Arc<dyn Filesystem> {
    Arc::new(LocalFs)
}

fn position_of(buffer: &Buffer, offset: usize) -> Position {
    let (row, col) = buffer.offset_to_point(offset);
    let line = buffer.line_text(row);
    Position {
        line: row + 1,
        column: line[..col.min(line.len())].chars().count() + 1,
    }
}

/// Start positions of every match.
pub fn find(path: &Path, pattern: &str, options: SearchOptions) -> Result<Vec<Position>> {
    let document = Document::open(local_fs(), path)?;
    let buffer = document.editor().buffer();
    Ok(find_all(buffer.text(), pattern, options)
        .into_iter()
        .map(|range| position_of(buffer, range.start))
        .collect())
}

/// Replace every match and save unless `dry_run`. Returns the count.
pub fn replace(
    path: &Path,
    pattern: &str,
    replacement: &str,
    options: SearchOptions,
    dry_run: bool,
) -> Result<usize> {
    let mut document = Document::open(local_fs(), path)?;
    let count = document
        .editor_mut()
        .replace_all(pattern, replacement, options);
    if count > 0 && !dry_run {
        document.save()?;
    }
    Ok(count)
}

/// Replay a key script against the file. Saves when `save` is set and
/// returns the resulting text either way.
pub fn run_keys(path: &Path, keys: &str, save: bool) -> Result<String> {
    let presses = script::parse(keys)?;
    let fs = local_fs();
    let mut document = if fs.exists(path) {
        Document::open(fs, path)?
    } else {
        Document::new(fs)
    };

    let now = Instant::now();
    let editor = document.editor_mut();
    for press in presses {
        if !editor.handle_key(press, now) {
            tracing::debug!("key {:?} not bound", press);
        }
    }
    tracing::info!("{}", editor.position());

    if save && (document.editor().is_modified() || document.path().is_none()) {
        document.save_as(path)?;
    }
    Ok(document.editor().text().to_string())
}

/// Display rows of the file at `width` (0 = no wrap).
pub fn wrap(path: &Path, width: usize) -> Result<Vec<String>> {
    let mut document = Document::open(local_fs(), path)?;
    document.editor_mut().set_wrap_width(width);
    Ok(document
        .editor()
        .display_lines()
        .into_iter()
        .map(str::to_string)
        .collect())
}
