//! # parenlex - scanner for a small S-expression language
//!
//! Converts a stream of characters into the tokens a parser consumes:
//! parentheses, keywords, identifiers and numeric literals, each carrying the
//! 1-based line and column it starts at.
//!
//! ## Quick Start
//!
//! ```rust
//! use parenlex::{Scanner, Token};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut scanner = Scanner::from_text("(defvar x 5)");
//! let tokens = scanner.drain()?;
//!
//! assert_eq!(tokens[1], Token::keyword("defvar", 1, 2));
//! assert_eq!(tokens[3], Token::numeric("5", 1, 11));
//! assert!(tokens[5].is_end());
//! # Ok(())
//! # }
//! ```
//!
//! Any [`std::io::BufRead`] works as a source, and a parser can pull tokens one
//! at a time with a single token of lookahead:
//!
//! ```rust
//! use std::io::BufReader;
//! use parenlex::{Scanner, TokenKind};
//!
//! # fn main() -> parenlex::Result<()> {
//! let file = BufReader::new("(+ 5 6)".as_bytes());
//! let mut scanner = Scanner::new(file);
//!
//! assert_eq!(scanner.peek_token()?.kind(), TokenKind::OpenParen);
//! assert_eq!(scanner.next_token()?.kind(), TokenKind::OpenParen);
//! assert_eq!(scanner.next_token()?.text(), "+");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Scanning stops at the first character that cannot be classified. The error
//! names the problem and its position, and the scanner keeps returning it:
//!
//! ```rust
//! use parenlex::{LexError, Scanner};
//!
//! let mut scanner = Scanner::from_text("(+ 1 2);");
//! let err = scanner.drain().unwrap_err();
//!
//! assert_eq!(err.tokens.len(), 5);
//! assert!(matches!(err.error, LexError::InvalidToken { found: ';', line: 1, column: 8 }));
//! ```
//!
//! ## Dialects
//!
//! Reserved words and cursor rules live in a [`ScannerConfig`], so scanners
//! for different dialects can coexist. See [`config`].

/// Version of the parenlex crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod lexer;

// Re-export main types
pub use config::{ColumnMode, ScannerConfig};
pub use error::{ConfigError, DrainError, LexError, Result, TokenShapeError};
pub use lexer::{KeywordSet, Scanner, Token, TokenKind, Tokens};
