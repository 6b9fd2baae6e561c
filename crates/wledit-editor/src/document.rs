use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, bail};
use wledit_fs::Filesystem;

use crate::editor::Editor;

pub const APP_NAME: &str = "WLEditor";
const UNTITLED: &str = "untitled.txt";

/// Answer to the "document has been modified" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Save,
    Discard,
    Cancel,
}

/// An editor bound to an optional file on a [`Filesystem`].
pub struct Document {
    editor: Editor,
    path: Option<PathBuf>,
    fs: Arc<dyn Filesystem>,
}

impl Document {
    pub fn new(fs: Arc<dyn Filesystem>) -> Self {
        Self {
            editor: Editor::new(),
            path: None,
            fs,
        }
    }

    pub fn open(fs: Arc<dyn Filesystem>, path: impl AsRef<Path>) -> Result<Self> {
        let mut document = Self::new(fs);
        document.load(path)?;
        Ok(document)
    }

    /// Replace the content with the file at `path`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.fs.read(path)?;
        self.editor.set_text(text);
        self.path = Some(path.to_path_buf());
        log::info!("opened {}", path.display());
        Ok(())
    }

    /// Start over with an empty, untitled buffer.
    pub fn clear(&mut self) {
        self.editor.set_text(String::new());
        self.path = None;
    }

    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            bail!("Document has no file name; use save as");
        };
        self.fs.write(&path, self.editor.text())?;
        self.editor.mark_saved();
        log::info!("saved {}", path.display());
        Ok(())
    }

    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.path = Some(path.as_ref().to_path_buf());
        self.save()
    }

    /// Resolve unsaved changes before closing or replacing the document.
    /// Returns `true` when the caller may proceed.
    pub fn resolve_unsaved(&mut self, choice: SaveChoice) -> Result<bool> {
        if !self.editor.is_modified() {
            return Ok(true);
        }
        match choice {
            SaveChoice::Save => {
                self.save()?;
                Ok(!self.editor.is_modified())
            }
            SaveChoice::Discard => Ok(true),
            SaveChoice::Cancel => Ok(false),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn file_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// Window title, e.g. `notes.txt* - WLEditor`.
    pub fn title(&self) -> String {
        let marker = if self.editor.is_modified() { "*" } else { "" };
        format!("{}{} - {}", self.file_name(), marker, APP_NAME)
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }
}
