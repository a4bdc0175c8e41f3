// Chunk: docs/chunks/editor_config - JSON configuration
//!
//! Editor configuration.
//!
//! The configuration is a JSON file holding the tunables of the suggestion
//! engine, the search index and the markdown theme. Every field has a default,
//! so a partial file only overrides what it names.
//!
//! ## File Location
//!
//! The file is stored at `<config_dir>/markpad/config.json`:
//! - macOS: `~/Library/Application Support/markpad/config.json`
//! - Linux: `~/.config/markpad/config.json`
//!
//! ## Schema Version
//!
//! The file includes a schema version. A file written for another version is
//! ignored with a warning and the defaults are used instead.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use markpad_markdown::{Category, MarkdownTheme, StyleOverride, ThemeError};
use markpad_search::{SearchOptions, DEFAULT_POOL_CAPACITY, DEFAULT_THRESHOLD_RATIO};
use markpad_suggest::{
    SuggestionOptions, DEFAULT_CACHE_CAPACITY, DEFAULT_DEBOUNCE_MS, DEFAULT_LOCALE,
    DEFAULT_MIN_WORD_LENGTH,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Current schema version for the config file.
///
/// Increment this when making breaking changes to the config format.
pub const SCHEMA_VERSION: u32 = 1;

/// Application name used for the config directory.
const APP_NAME: &str = "markpad";

/// Config file name.
const CONFIG_FILENAME: &str = "config.json";

// =============================================================================
// Serializable Data Types
// =============================================================================

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    pub suggestions: SuggestionConfig,
    pub search: SearchConfig,
    pub theme: ThemeConfig,
}

/// Word suggestion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    pub min_word_length: usize,
    pub use_external_provider: bool,
    pub locale: String,
    pub cache_capacity: usize,
    pub debounce_ms: u64,
    /// Folder whose text files make up the word corpus.
    pub corpus_folder: Option<PathBuf>,
}

/// Search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub pool_capacity: usize,
    /// Fraction of the viewport length the viewport may move before the
    /// highlight window is rebuilt.
    pub scroll_threshold_ratio: f32,
}

/// Theme settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Per-category overrides applied on top of the built-in theme.
    pub overrides: BTreeMap<Category, StyleOverride>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            suggestions: SuggestionConfig::default(),
            search: SearchConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            use_external_provider: true,
            locale: DEFAULT_LOCALE.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            corpus_folder: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
            scroll_threshold_ratio: DEFAULT_THRESHOLD_RATIO,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl SuggestionConfig {
    pub fn options(&self) -> SuggestionOptions {
        SuggestionOptions {
            min_word_length: self.min_word_length,
            use_external_provider: self.use_external_provider,
            locale: self.locale.clone(),
            cache_capacity: self.cache_capacity,
        }
    }
}

impl SearchConfig {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            pool_capacity: self.pool_capacity,
            threshold_ratio: self.scroll_threshold_ratio,
        }
    }
}

impl ThemeConfig {
    /// The built-in theme with the overrides applied.
    pub fn build(&self) -> Result<MarkdownTheme, ThemeError> {
        let mut theme = MarkdownTheme::default();
        theme.apply_overrides(&self.overrides)?;
        Ok(theme)
    }
}

// =============================================================================
// Config File Path
// =============================================================================

/// Returns the path to the config file.
///
/// Returns `None` if the platform config directory cannot be determined.
pub fn config_file_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_NAME).join(CONFIG_FILENAME))
}

// =============================================================================
// Load / Save
// =============================================================================

impl EditorConfig {
    /// Loads the config from the platform config directory.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&path)
    }

    /// Loads the config from `path`.
    ///
    /// A missing file yields the defaults. A file with another schema version
    /// also yields the defaults, with a warning. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: EditorConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if config.schema_version != SCHEMA_VERSION {
            warn!(
                expected = SCHEMA_VERSION,
                found = config.schema_version,
                path = %path.display(),
                "config schema version mismatch, using defaults"
            );
            return Ok(Self::default());
        }

        Ok(config)
    }

    /// Writes the config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_file_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Writes the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Encode)?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(write_err)?;
        fs::rename(&temp_path, path).map_err(write_err)?;
        Ok(())
    }
}
