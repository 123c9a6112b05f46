//! Lexical analysis for parenlex
//!
//! Converts a character stream into classified, positioned tokens.

mod chars;
mod keywords;
mod scanner;
mod source;
mod token;

pub use keywords::KeywordSet;
pub use scanner::{Scanner, Tokens};
pub use token::{Token, TokenKind};
