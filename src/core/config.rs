//! Game configuration.
//!
//! A game is configured once, before the session starts:
//! - `target_score`: attempts per game
//! - `catalog`: the patterns that can be dealt
//! - `keys`: which raw keys produce which input events
//!
//! Configuration can be built in code or loaded from TOML:
//!
//! ```toml
//! target_score = 10
//! patterns = ["LLL", "RR", "LRLR"]
//!
//! [keys]
//! left = ["q", "w", "e"]
//! right = ["i", "o", "p"]
//! restart = "space"
//! ```
//!
//! Missing entries fall back to `GameConfig::default()`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::pattern::{Pattern, PatternCatalog};
use crate::input::keymap::{KeyBindingsFile, KeyMapping};

/// Attempts per game in the classic rules.
pub const DEFAULT_TARGET_SCORE: u32 = 10;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of evaluated attempts after which the game is over.
    pub target_score: u32,

    /// Patterns dealt uniformly at random.
    pub catalog: PatternCatalog,

    /// Raw key bindings for the input source.
    pub keys: KeyMapping,
}

impl GameConfig {
    /// Create a configuration with the default catalog and keys.
    #[must_use]
    pub fn new(target_score: u32) -> Self {
        Self {
            target_score,
            ..Self::default()
        }
    }

    /// Replace the pattern catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: PatternCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the key bindings.
    #[must_use]
    pub fn with_keys(mut self, keys: KeyMapping) -> Self {
        self.keys = keys;
        self
    }

    /// Check the configuration before a session starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_score == 0 {
            return Err(ConfigError::ZeroTargetScore);
        }
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if let Some(index) = self.catalog.iter().position(Pattern::is_empty) {
            return Err(ConfigError::EmptyPattern { index });
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.message().to_string()))?;
        let defaults = Self::default();

        let catalog = match file.patterns {
            Some(entries) => PatternCatalog::parse(&entries)?,
            None => defaults.catalog,
        };
        let keys = match file.keys {
            Some(keys) => KeyMapping::try_from(keys)?,
            None => defaults.keys,
        };

        let config = Self {
            target_score: file.target_score.unwrap_or(defaults.target_score),
            catalog,
            keys,
        };
        config.validate()?;

        log::debug!(
            "loaded config: target {} with {} patterns",
            config.target_score,
            config.catalog.len()
        );
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }
}

impl Default for GameConfig {
    /// Ten attempts, the classic seven patterns, `q/w/e`, `i/o/p`, space.
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            catalog: PatternCatalog::default(),
            keys: KeyMapping::default(),
        }
    }
}

/// On-disk configuration. Every field is optional.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    target_score: Option<u32>,
    patterns: Option<Vec<String>>,
    keys: Option<KeyBindingsFile>,
}
