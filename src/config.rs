//! Scanner configuration
//!
//! A [`ScannerConfig`] describes one dialect: its reserved words and a couple
//! of cursor rules. It is immutable once handed to a scanner, and can be loaded
//! from JSON:
//!
//! ```rust
//! use parenlex::{ColumnMode, ScannerConfig};
//!
//! let config = ScannerConfig::from_json(
//!     r#"{"keywords": ["defvar", "defun"], "column_mode": "continuous"}"#,
//! )?;
//! assert!(config.keywords.contains("defun"));
//! assert_eq!(config.column_mode, ColumnMode::Continuous);
//! # Ok::<(), parenlex::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::lexer::KeywordSet;

/// How the column counter behaves when a newline is consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMode {
    /// Column restarts at 1 on every new line
    #[default]
    ResetOnNewline,
    /// Column keeps counting across lines; a newline only advances it by one
    Continuous,
}

/// Dialect settings for a [`Scanner`](crate::Scanner)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScannerConfig {
    /// Words that scan as keywords instead of identifiers
    pub keywords: KeywordSet,
    /// Column behavior across newlines
    pub column_mode: ColumnMode,
    /// Stop identifiers at `(` and `)` instead of absorbing them
    pub parens_end_identifiers: bool,
}

impl ScannerConfig {
    /// Parses and validates a JSON configuration
    ///
    /// Missing fields take their defaults. Keywords that the identifier scan
    /// could never produce are rejected.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: ScannerConfig = serde_json::from_str(text)?;
        if let Some(word) = config.keywords.first_unscannable() {
            return Err(ConfigError::InvalidKeyword {
                word: word.to_string(),
            });
        }
        Ok(config)
    }

    /// Replaces the reserved words
    pub fn with_keywords(mut self, keywords: KeywordSet) -> Self {
        self.keywords = keywords;
        self
    }

    /// Sets the column behavior across newlines
    pub fn with_column_mode(mut self, column_mode: ColumnMode) -> Self {
        self.column_mode = column_mode;
        self
    }

    /// Makes `(` and `)` end identifiers
    pub fn with_parens_ending_identifiers(mut self, enabled: bool) -> Self {
        self.parens_end_identifiers = enabled;
        self
    }
}
