use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_TERMINATOR: char = '$';

/// Settings for indexing character text with [`crate::TextIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Sentinel appended to the text. Must not occur in it.
    pub terminator: char,
    /// When false, text and queries are folded to lowercase.
    pub case_sensitive: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            terminator: DEFAULT_TERMINATOR,
            case_sensitive: false,
        }
    }
}

impl TreeConfig {
    /// Parses a config from TOML. Missing keys keep their defaults.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Applies case folding to one character.
    #[must_use]
    pub fn fold(&self, ch: char) -> char {
        if self.case_sensitive {
            ch
        } else {
            ch.to_lowercase().next().unwrap_or(ch)
        }
    }
}
