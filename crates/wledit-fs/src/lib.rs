// wledit-fs: Filesystem access for the editor
//
// Documents read and write through the `Filesystem` trait so the desktop
// front end and tests can share one code path with different backends.

use anyhow::{Context, Result};
use std::path::Path;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

pub trait Filesystem: Send + Sync {
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
}

// ---------------------------------------------------------------------------
// Local implementation
// ---------------------------------------------------------------------------

pub struct LocalFs;

impl Filesystem for LocalFs {
    fn read(&self, path: &Path) -> Result<String> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read file {}", path.display()))?;
        log::debug!("read {} bytes from {}", text.len(), path.display());
        Ok(text)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .with_context(|| format!("Cannot write file {}", path.display()))?;
        log::debug!("wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
