//! Error types for the parenlex scanner

use thiserror::Error;

use crate::lexer::{Token, TokenKind};

/// Errors reported while scanning
///
/// Every variant carries the 1-based line and column of the character that
/// caused it. None of them is recoverable for the token being scanned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// The character source failed for a reason other than exhaustion
    ///
    /// **Triggered by:** an I/O fault, invalid UTF-8, or a codepoint truncated by
    /// the end of the stream
    #[error("Unreadable source at line {line}, column {column}: {reason}")]
    UnreadableSource {
        /// Line of the cursor when the read failed
        line: usize,
        /// Column of the cursor when the read failed
        column: usize,
        /// Description of the underlying failure
        reason: String,
    },

    /// The current character cannot begin any token
    ///
    /// **Triggered by:** `;`, control characters, and anything outside the
    /// letter, digit and symbol classes
    /// **Example:** `(+ 1 2);`
    #[error("Invalid token {found:?} at line {line}, column {column}")]
    InvalidToken {
        /// Offending character
        found: char,
        /// Line of the offending character
        line: usize,
        /// Column of the offending character
        column: usize,
    },

    /// A character inside an identifier breaks the identifier rules
    ///
    /// **Example:** `abc;d`
    #[error("Invalid character {found:?} in identifier {partial:?} at line {line}, column {column}")]
    InvalidIdentifierChar {
        /// Offending character
        found: char,
        /// Identifier text scanned before the offending character
        partial: String,
        /// Line of the offending character
        line: usize,
        /// Column of the offending character
        column: usize,
    },

    /// A character inside a numeric literal breaks the numeric rules
    ///
    /// **Example:** `12ab`
    #[error("Invalid character {found:?} in numeric literal {partial:?} at line {line}, column {column}")]
    InvalidNumericChar {
        /// Offending character
        found: char,
        /// Literal text scanned before the offending character
        partial: String,
        /// Line of the offending character
        line: usize,
        /// Column of the offending character
        column: usize,
    },
}

impl LexError {
    /// Line the error points at (1-indexed)
    pub fn line(&self) -> usize {
        match self {
            LexError::UnreadableSource { line, .. }
            | LexError::InvalidToken { line, .. }
            | LexError::InvalidIdentifierChar { line, .. }
            | LexError::InvalidNumericChar { line, .. } => *line,
        }
    }

    /// Column the error points at (1-indexed)
    pub fn column(&self) -> usize {
        match self {
            LexError::UnreadableSource { column, .. }
            | LexError::InvalidToken { column, .. }
            | LexError::InvalidIdentifierChar { column, .. }
            | LexError::InvalidNumericChar { column, .. } => *column,
        }
    }

    /// Whether the failure came from the source rather than from its content
    pub fn is_unreadable(&self) -> bool {
        matches!(self, LexError::UnreadableSource { .. })
    }
}

/// Failure of a full drain, with everything scanned before the error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error} (after {} tokens)", .tokens.len())]
pub struct DrainError {
    /// Tokens produced before the failure, in order
    pub tokens: Vec<Token>,
    /// First error encountered
    #[source]
    pub error: LexError,
}

/// A serialized token whose text does not match its kind
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenShapeError {
    /// Keywords, identifiers and numerics need non-empty text
    #[error("{kind} token requires text")]
    MissingText {
        /// Kind of the rejected token
        kind: TokenKind,
    },

    /// Parens and end of input carry no text
    #[error("{kind} token cannot carry text {text:?}")]
    UnexpectedText {
        /// Kind of the rejected token
        kind: TokenKind,
        /// Text found on it
        text: String,
    },
}

/// Errors raised while loading a [`ScannerConfig`](crate::config::ScannerConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for a scanner config
    #[error("Invalid scanner configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A reserved word could never be produced by the identifier scan
    #[error("Keyword {word:?} is not a valid identifier")]
    InvalidKeyword {
        /// The rejected word
        word: String,
    },
}

/// Result type for scanner operations
pub type Result<T> = std::result::Result<T, LexError>;
