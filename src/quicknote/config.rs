use crate::error::{NotesError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_STORAGE_KEY: &str = "notes-v1";
const DEFAULT_TITLE: &str = "Untitled Note";
const DEFAULT_TITLE_MAX_CHARS: usize = 60;

/// Configuration for quicknote, stored in `config.json` next to the data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotesConfig {
    /// Key of the single storage entry holding the whole collection
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Title given to notes created with "new note"
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Maximum title length, in characters
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_title_max_chars() -> usize {
    DEFAULT_TITLE_MAX_CHARS
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            default_title: default_title(),
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
        }
    }
}

/// Whether `key` can name a storage entry: non-empty, ASCII letters, digits,
/// `-`, `_` and `.` only, no leading dot, and not the config file's own name.
pub fn is_valid_storage_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key != CONFIG_FILENAME.trim_end_matches(".json")
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl NotesConfig {
    /// Read `config.json` from `config_dir`. A directory without one gets the
    /// defaults; out-of-range values are replaced, see [`NotesConfig::validated`].
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&config_path)?;
        let config: NotesConfig = serde_json::from_str(&raw)?;
        Ok(config.validated())
    }

    /// Write `config.json` into `config_dir`, creating it if needed.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), json).map_err(NotesError::Io)
    }

    /// Replace values that would break the note invariants with their
    /// defaults, logging each replacement.
    ///
    /// - `title_max_chars` must be at least 1
    /// - `default_title` must be non-blank and fit in `title_max_chars`
    /// - `storage_key` must pass [`is_valid_storage_key`]
    pub fn validated(mut self) -> Self {
        if self.title_max_chars == 0 {
            warn!(
                fallback = DEFAULT_TITLE_MAX_CHARS,
                "title_max_chars is 0, using default"
            );
            self.title_max_chars = DEFAULT_TITLE_MAX_CHARS;
        }

        let title_len = self.default_title.chars().count();
        if self.default_title.trim().is_empty() || title_len > self.title_max_chars {
            warn!(
                title = %self.default_title,
                max = self.title_max_chars,
                "default_title is blank or too long, using default"
            );
            self.default_title = DEFAULT_TITLE.chars().take(self.title_max_chars).collect();
        }

        if !is_valid_storage_key(&self.storage_key) {
            warn!(key = %self.storage_key, "storage_key is not usable, using default");
            self.storage_key = default_storage_key();
        }

        self
    }
}
