// Editor preferences
// Stored as JSON at <config dir>/wledit/settings.json

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_FONT_FAMILY: &str = "Noto Sans Mono CJK JP";

/// Tried in order when the configured family is not installed.
pub const FONT_FALLBACKS: &[&str] = &[
    "Noto Sans Mono",
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Consolas",
    "Monaco",
    "Courier New",
];

pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<u32> = 8..=48;
pub const WRAP_WIDTH_RANGE: std::ops::RangeInclusive<usize> = 0..=200;

pub const KEYS: &[&str] = &[
    "font_family",
    "font_size",
    "wrap_width",
    "tool_bar_visible",
    "status_extras_visible",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub font_family: String,
    pub font_size: u32,
    /// Characters per row; 0 disables wrapping.
    pub wrap_width: usize,
    pub tool_bar_visible: bool,
    pub status_extras_visible: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: 12,
            wrap_width: 80,
            tool_bar_visible: true,
            status_extras_visible: true,
        }
    }
}

impl Settings {
    /// Parse and apply one `key = value` pair.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "font_family" => {
                let family = value.trim();
                if family.is_empty() {
                    bail!("font_family must not be empty");
                }
                self.font_family = family.to_string();
            }
            "font_size" => {
                let size: u32 = value
                    .parse()
                    .with_context(|| format!("Invalid font_size: {}", value))?;
                if !FONT_SIZE_RANGE.contains(&size) {
                    bail!(
                        "font_size must be between {} and {}",
                        FONT_SIZE_RANGE.start(),
                        FONT_SIZE_RANGE.end()
                    );
                }
                self.font_size = size;
            }
            "wrap_width" => {
                let width: usize = value
                    .parse()
                    .with_context(|| format!("Invalid wrap_width: {}", value))?;
                if !WRAP_WIDTH_RANGE.contains(&width) {
                    bail!(
                        "wrap_width must be between {} and {}",
                        WRAP_WIDTH_RANGE.start(),
                        WRAP_WIDTH_RANGE.end()
                    );
                }
                self.wrap_width = width;
            }
            "tool_bar_visible" => self.tool_bar_visible = parse_bool(value)?,
            "status_extras_visible" => self.status_extras_visible = parse_bool(value)?,
            _ => bail!("Unknown setting: {} (expected one of {})", key, KEYS.join(", ")),
        }
        Ok(())
    }

    /// Clamp values written by hand into their valid ranges.
    fn sanitize(mut self) -> Self {
        self.font_size = self
            .font_size
            .clamp(*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end());
        self.wrap_width = self.wrap_width.min(*WRAP_WIDTH_RANGE.end());
        if self.font_family.trim().is_empty() {
            self.font_family = DEFAULT_FONT_FAMILY.to_string();
        }
        self
    }

    /// The configured family if installed, else the first installed fallback.
    pub fn resolve_font<'a>(&'a self, installed: &[&str]) -> Option<&'a str> {
        if installed.contains(&self.font_family.as_str()) {
            return Some(&self.font_family);
        }
        FONT_FALLBACKS
            .iter()
            .copied()
            .find(|family| installed.contains(family))
    }

    /// Status line text for the wrap setting.
    pub fn wrap_status(&self) -> String {
        if self.wrap_width == 0 {
            "Line wrap disabled".to_string()
        } else {
            format!("Wrap: {} chars", self.wrap_width)
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => bail!("Expected a boolean, got {}", value),
    }
}

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "wleditor", "wledit")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    let config = dirs.config_dir().to_path_buf();
    std::fs::create_dir_all(&config)?;
    Ok(config)
}

/// Get the settings file path
pub fn settings_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("settings.json"))
}

/// Load settings from a specific path; a missing file yields defaults.
pub fn load_from(path: &Path) -> Result<Settings> {
    if path.exists() {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&data)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        Ok(settings.sanitize())
    } else {
        log::debug!("no settings at {}, using defaults", path.display());
        Ok(Settings::default())
    }
}

/// Save settings to a specific path
pub fn save_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, data).with_context(|| format!("Cannot write {}", path.display()))?;
    Ok(())
}

/// Load the settings from the config directory
pub fn load() -> Result<Settings> {
    load_from(&settings_path()?)
}

/// Save the settings to the config directory
pub fn save(settings: &Settings) -> Result<()> {
    save_to(settings, &settings_path()?)
}
