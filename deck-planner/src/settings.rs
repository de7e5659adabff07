//! Persistent planner settings (`settings.json`).
//!
//! The file holds the API key and the model identifier:
//!
//! ```json
//! { "apiKey": "sk-ant-...", "model": "claude-sonnet-4-5" }
//! ```
//!
//! A missing file yields defaults. A file that cannot be read or parsed also
//! yields defaults, with a warning, so a corrupt file never blocks startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";

/// File name inside the config directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Known model identifiers with display labels.
pub const KNOWN_MODELS: [(&str, &str); 6] = [
    ("claude-opus-4-5", "Claude Opus 4.5 (Most Powerful)"),
    ("claude-sonnet-4-5", "Claude Sonnet 4.5 (Recommended)"),
    ("claude-haiku-4-5", "Claude Haiku 4.5 (Fastest)"),
    ("claude-3-5-sonnet-20241022", "Claude 3.5 Sonnet"),
    ("claude-3-5-haiku-20241022", "Claude 3.5 Haiku"),
    ("claude-3-opus-20240229", "Claude 3 Opus"),
];

/// Returns true if `model` is one of [`KNOWN_MODELS`].
#[must_use]
pub fn is_known_model(model: &str) -> bool {
    KNOWN_MODELS.iter().any(|(id, _)| *id == model)
}

/// Errors from the settings store.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No config directory could be determined.
    #[error("cannot determine a config directory")]
    NoConfigDir,

    /// Reading or writing the file failed.
    #[error("settings IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialising settings failed.
    #[error("settings serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Planner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Anthropic API key; empty when unset.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Settings {
    /// The key with all but the last four characters hidden.
    #[must_use]
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.is_empty() {
            return "(not set)".to_string();
        }
        let visible = chars.len().min(4);
        let tail: String = chars[chars.len() - visible..].iter().collect();
        format!("{}{tail}", "*".repeat(chars.len() - visible))
    }
}

/// Reads and writes [`Settings`] in a config directory.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    /// Store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in the platform config directory (`~/.config/deckgen` on Linux).
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoConfigDir`] if the platform has none.
    pub fn default_location() -> Result<Self, SettingsError> {
        let dir = dirs::config_dir()
            .ok_or(SettingsError::NoConfigDir)?
            .join("deckgen");
        Ok(Self::new(dir))
    }

    /// Path of the settings file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    /// Config directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load settings, falling back to defaults.
    #[must_use]
    pub fn load(&self) -> Settings {
        let path = self.path();
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file; using defaults");
                return Settings::default();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unreadable settings file; using defaults");
                return Settings::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Corrupt settings file; using defaults");
                Settings::default()
            }
        }
    }

    /// Write settings, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(self.path(), json)?;
        tracing::info!(path = %self.path().display(), model = %settings.model, "Saved settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::new(dir.path());
        assert_eq!(store.load(), Settings::default());
        assert_eq!(store.load().model, DEFAULT_MODEL);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::new(dir.path().join("nested"));
        let settings = Settings {
            api_key: "sk-ant-123456".to_string(),
            model: "claude-haiku-4-5".to_string(),
        };
        store.save(&settings).expect("save");

        let raw = std::fs::read_to_string(store.path()).expect("read");
        assert!(raw.contains("\"apiKey\""));
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::new(dir.path());
        std::fs::write(store.path(), "{ not json").expect("write");
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::new(dir.path());
        std::fs::write(store.path(), r#"{"apiKey":"k"}"#).expect("write");
        let settings = store.load();
        assert_eq!(settings.api_key, "k");
        assert_eq!(settings.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_masked_key() {
        let mut settings = Settings::default();
        assert_eq!(settings.masked_key(), "(not set)");
        settings.api_key = "sk-ant-abcd".to_string();
        assert_eq!(settings.masked_key(), "*******abcd");
        settings.api_key = "ab".to_string();
        assert_eq!(settings.masked_key(), "ab");
    }

    #[test]
    fn test_known_models() {
        assert!(is_known_model(DEFAULT_MODEL));
        assert!(!is_known_model("gpt-4"));
    }
}
