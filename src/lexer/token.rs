use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TokenShapeError;

/// A single token from the source text
///
/// Tokens are immutable once produced. Only `Keyword`, `Ident` and `Numeric`
/// tokens carry text, which is never empty for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawToken")]
pub struct Token {
    kind: TokenKind,
    text: String,
    line: usize,
    column: usize,
}

impl Token {
    /// `(` at the given position
    pub fn open_paren(line: usize, column: usize) -> Self {
        Self::bare(TokenKind::OpenParen, line, column)
    }

    /// `)` at the given position
    pub fn close_paren(line: usize, column: usize) -> Self {
        Self::bare(TokenKind::CloseParen, line, column)
    }

    /// End of input at the given position
    pub fn end_of_input(line: usize, column: usize) -> Self {
        Self::bare(TokenKind::EndOfInput, line, column)
    }

    /// Reserved word
    pub fn keyword(text: impl Into<String>, line: usize, column: usize) -> Self {
        Self::word(TokenKind::Keyword, text.into(), line, column)
    }

    /// Identifier
    pub fn ident(text: impl Into<String>, line: usize, column: usize) -> Self {
        Self::word(TokenKind::Ident, text.into(), line, column)
    }

    /// Numeric literal, unvalidated
    pub fn numeric(text: impl Into<String>, line: usize, column: usize) -> Self {
        Self::word(TokenKind::Numeric, text.into(), line, column)
    }

    fn bare(kind: TokenKind, line: usize, column: usize) -> Self {
        Token {
            kind,
            text: String::new(),
            line,
            column,
        }
    }

    /// Panics if `text` is empty
    fn word(kind: TokenKind, text: String, line: usize, column: usize) -> Self {
        assert!(!text.is_empty(), "{kind} token without text");
        Token {
            kind,
            text,
            line,
            column,
        }
    }

    /// Kind of token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Literal text matched, empty for parens and end of input
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Line of the first character (1-indexed)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column of the first character (1-indexed)
    pub fn column(&self) -> usize {
        self.column
    }

    /// Whether this token terminates the stream
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

/// Unchecked token fields as they appear in serialized form
#[derive(Deserialize)]
struct RawToken {
    kind: TokenKind,
    #[serde(default)]
    text: String,
    line: usize,
    column: usize,
}

impl TryFrom<RawToken> for Token {
    type Error = TokenShapeError;

    fn try_from(raw: RawToken) -> Result<Self, Self::Error> {
        match (raw.kind.has_text(), raw.text.is_empty()) {
            (true, true) => Err(TokenShapeError::MissingText { kind: raw.kind }),
            (false, false) => Err(TokenShapeError::UnexpectedText {
                kind: raw.kind,
                text: raw.text,
            }),
            _ => Ok(Token {
                kind: raw.kind,
                text: raw.text,
                line: raw.line,
                column: raw.column,
            }),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.has_text() {
            write!(f, "{} {:?}@({},{})", self.kind, self.text, self.line, self.column)
        } else {
            write!(f, "{}@({},{})", self.kind, self.line, self.column)
        }
    }
}

/// All token kinds the scanner produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// Identifier found in the keyword set
    Keyword,
    /// Any other identifier
    Ident,
    /// Numeric literal
    Numeric,
    /// Source exhausted
    EndOfInput,
}

impl TokenKind {
    /// Whether tokens of this kind carry literal text
    pub fn has_text(self) -> bool {
        matches!(
            self,
            TokenKind::Keyword | TokenKind::Ident | TokenKind::Numeric
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::OpenParen => "OpenParen",
            TokenKind::CloseParen => "CloseParen",
            TokenKind::Keyword => "Keyword",
            TokenKind::Ident => "Ident",
            TokenKind::Numeric => "Numeric",
            TokenKind::EndOfInput => "EndOfInput",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_words_carry_text() {
        assert_eq!(Token::open_paren(1, 1).text(), "");
        assert_eq!(Token::close_paren(1, 2).text(), "");
        assert_eq!(Token::end_of_input(1, 3).text(), "");
        assert_eq!(Token::ident("x", 1, 1).text(), "x");
        assert!(TokenKind::Numeric.has_text());
        assert!(!TokenKind::EndOfInput.has_text());
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::open_paren(1, 1).to_string(), "OpenParen@(1,1)");
        assert_eq!(
            Token::keyword("defvar", 1, 2).to_string(),
            "Keyword \"defvar\"@(1,2)"
        );
    }

    #[test]
    #[should_panic(expected = "Ident token without text")]
    fn test_empty_word_is_rejected() {
        Token::ident("", 1, 1);
    }

    #[test]
    fn test_json_round_trip_keeps_invariant() {
        let token: Token =
            serde_json::from_str(r#"{"kind":"Keyword","text":"defvar","line":1,"column":2}"#)
                .unwrap();
        assert_eq!(token, Token::keyword("defvar", 1, 2));

        let token: Token =
            serde_json::from_str(r#"{"kind":"CloseParen","line":1,"column":7}"#).unwrap();
        assert_eq!(token, Token::close_paren(1, 7));
    }

    #[test]
    fn test_json_with_wrong_text_is_rejected() {
        let err = serde_json::from_str::<Token>(r#"{"kind":"Ident","text":"","line":0,"column":0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Ident token requires text"));

        let err = serde_json::from_str::<Token>(
            r#"{"kind":"OpenParen","text":"junk","line":1,"column":1}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("OpenParen token cannot carry text"));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(Token::numeric("5", 1, 4)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "Numeric", "text": "5", "line": 1, "column": 4})
        );
    }
}
