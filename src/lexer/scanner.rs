use std::io::{self, BufRead};
use std::iter::FusedIterator;

use tracing::{debug, trace};

use super::chars;
use super::source::CharSource;
use super::token::Token;
use crate::config::{ColumnMode, ScannerConfig};
use crate::error::{DrainError, LexError, Result};

/// Scanner for parenthesized S-expression source
///
/// Pulls codepoints from any [`BufRead`] and hands out one [`Token`] per call.
/// Once the source is exhausted every call yields an `EndOfInput` token at the
/// same position. Once an error is reported every call repeats it.
pub struct Scanner<R> {
    /// Decoded character source
    source: CharSource<R>,
    /// Dialect settings
    config: ScannerConfig,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Characters consumed so far
    position: usize,
    /// Token scanned by `peek_token` and not handed out yet
    lookahead: Option<Token>,
    /// Error that stopped the scanner
    failure: Option<LexError>,
}

impl<'a> Scanner<&'a [u8]> {
    /// Creates a scanner over in-memory text with the default dialect
    pub fn from_text(text: &'a str) -> Self {
        Scanner::new(text.as_bytes())
    }
}

impl<R: BufRead> Scanner<R> {
    /// Creates a scanner with the default dialect
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ScannerConfig::default())
    }

    /// Creates a scanner for a specific dialect
    pub fn with_config(reader: R, config: ScannerConfig) -> Self {
        Scanner {
            source: CharSource::new(reader),
            config,
            line: 1,
            column: 1,
            position: 0,
            lookahead: None,
            failure: None,
        }
    }

    /// Scans and returns the next token
    pub fn next_token(&mut self) -> Result<Token> {
        if let Some(token) = self.lookahead.take() {
            return Ok(token);
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        match self.scan_token() {
            Ok(token) => {
                trace!(
                    kind = %token.kind(),
                    text = token.text(),
                    line = token.line(),
                    column = token.column(),
                    "scanned token"
                );
                Ok(token)
            }
            Err(err) => {
                debug!(error = %err, "scanner stopped");
                self.failure = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Returns the next token without consuming it
    ///
    /// The token is scanned once and handed out by the following
    /// [`next_token`](Self::next_token) call.
    pub fn peek_token(&mut self) -> Result<&Token> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.next_token()?,
        };
        Ok(&*self.lookahead.insert(token))
    }

    /// Scans every remaining token, `EndOfInput` included
    ///
    /// On failure the error comes back with the tokens scanned before it.
    pub fn drain(&mut self) -> std::result::Result<Vec<Token>, DrainError> {
        let mut tokens = Vec::new();
        loop {
            match self.next_token() {
                Ok(token) => {
                    let end = token.is_end();
                    tokens.push(token);
                    if end {
                        break;
                    }
                }
                Err(error) => return Err(DrainError { tokens, error }),
            }
        }
        debug!(count = tokens.len(), "drained token stream");
        Ok(tokens)
    }

    /// Iterates over the remaining tokens
    ///
    /// The iterator ends after yielding `EndOfInput` or the first error.
    pub fn tokens(&mut self) -> Tokens<'_, R> {
        Tokens {
            scanner: self,
            done: false,
        }
    }

    /// Current line (1-indexed)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current column (1-indexed)
    pub fn column(&self) -> usize {
        self.column
    }

    /// Number of characters consumed
    pub fn position(&self) -> usize {
        self.position
    }

    /// Dialect this scanner was built with
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    fn scan_token(&mut self) -> Result<Token> {
        self.skip_whitespace()?;

        let (line, column) = (self.line, self.column);
        let c = match self.peek()? {
            Some(c) => c,
            None => return Ok(Token::end_of_input(line, column)),
        };

        match c {
            '(' => {
                self.advance()?;
                Ok(Token::open_paren(line, column))
            }
            ')' => {
                self.advance()?;
                Ok(Token::close_paren(line, column))
            }
            c if chars::is_ident_start(c) => self.scan_identifier(c, line, column),
            c if chars::is_decimal_digit(c) => self.scan_numeric(c, line, column),
            found => Err(LexError::InvalidToken {
                found,
                line,
                column,
            }),
        }
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        while let Some(c) = self.peek()? {
            if !chars::is_skippable_whitespace(c) {
                break;
            }
            self.advance()?;
        }
        Ok(())
    }

    /// Scans an identifier whose first character `first` is still unconsumed
    fn scan_identifier(&mut self, first: char, line: usize, column: usize) -> Result<Token> {
        self.advance()?;
        let mut text = String::from(first);

        while let Some(c) = self.peek()? {
            if chars::is_terminating_whitespace(c) {
                break;
            }
            if self.config.parens_end_identifiers && matches!(c, '(' | ')') {
                break;
            }
            if !chars::is_ident_continue(c) {
                return Err(LexError::InvalidIdentifierChar {
                    found: c,
                    partial: text,
                    line: self.line,
                    column: self.column,
                });
            }
            self.advance()?;
            text.push(c);
        }

        if self.config.keywords.contains(&text) {
            Ok(Token::keyword(text, line, column))
        } else {
            Ok(Token::ident(text, line, column))
        }
    }

    /// Scans a numeric literal whose first digit `first` is still unconsumed
    ///
    /// Only the character set is checked; `1-2.3.` is a single literal.
    fn scan_numeric(&mut self, first: char, line: usize, column: usize) -> Result<Token> {
        self.advance()?;
        let mut text = String::from(first);

        while let Some(c) = self.peek()? {
            if chars::is_terminating_whitespace(c) || c == ')' {
                break;
            }
            if !chars::is_numeric_continue(c) {
                return Err(LexError::InvalidNumericChar {
                    found: c,
                    partial: text,
                    line: self.line,
                    column: self.column,
                });
            }
            self.advance()?;
            text.push(c);
        }

        Ok(Token::numeric(text, line, column))
    }

    fn peek(&mut self) -> Result<Option<char>> {
        self.source.peek().map_err(|e| self.unreadable(e))
    }

    fn advance(&mut self) -> Result<Option<char>> {
        let next = self.source.next_char().map_err(|e| self.unreadable(e))?;
        if let Some(c) = next {
            self.position += 1;
            if c == '\n' {
                self.line += 1;
                self.column = match self.config.column_mode {
                    ColumnMode::ResetOnNewline => 1,
                    ColumnMode::Continuous => self.column + 1,
                };
            } else {
                self.column += 1;
            }
        }
        Ok(next)
    }

    fn unreadable(&self, err: io::Error) -> LexError {
        LexError::UnreadableSource {
            line: self.line,
            column: self.column,
            reason: err.to_string(),
        }
    }
}

/// Iterator over a scanner's remaining tokens, see [`Scanner::tokens`]
pub struct Tokens<'s, R> {
    scanner: &'s mut Scanner<R>,
    done: bool,
}

impl<R: BufRead> Iterator for Tokens<'_, R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.scanner.next_token();
        self.done = match &item {
            Ok(token) => token.is_end(),
            Err(_) => true,
        };
        Some(item)
    }
}

impl<R: BufRead> FusedIterator for Tokens<'_, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{KeywordSet, TokenKind};

    fn first_token(source: &str) -> Token {
        Scanner::from_text(source).next_token().unwrap()
    }

    #[test]
    fn test_parens() {
        let tok = first_token("(");
        assert_eq!(tok.kind(), TokenKind::OpenParen);
        assert_eq!((tok.line(), tok.column()), (1, 1));

        let tok = first_token(")");
        assert_eq!(tok.kind(), TokenKind::CloseParen);
        assert_eq!((tok.line(), tok.column()), (1, 1));
    }

    #[test]
    fn test_operator_symbols_are_identifiers() {
        for op in ["+", "-", "*", "/"] {
            let tok = first_token(op);
            assert_eq!(tok.kind(), TokenKind::Ident);
            assert_eq!(tok.text(), op);
        }
    }

    #[test]
    fn test_identifiers_and_keywords() {
        assert_eq!(first_token("myvar"), Token::ident("myvar", 1, 1));
        assert_eq!(first_token("defvar"), Token::keyword("defvar", 1, 1));
        assert_eq!(first_token("set!"), Token::ident("set!", 1, 1));
        assert_eq!(first_token("x2y"), Token::ident("x2y", 1, 1));
        assert_eq!(first_token("λ"), Token::ident("λ", 1, 1));
    }

    #[test]
    fn test_basic_arithmetic() {
        let tokens = Scanner::from_text("(+ 5 6)").drain().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::open_paren(1, 1),
                Token::ident("+", 1, 2),
                Token::numeric("5", 1, 4),
                Token::numeric("6", 1, 6),
                Token::close_paren(1, 7),
                Token::end_of_input(1, 8),
            ]
        );
    }

    #[test]
    fn test_statement() {
        let tokens = Scanner::from_text("(defvar x 5)").drain().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::open_paren(1, 1),
                Token::keyword("defvar", 1, 2),
                Token::ident("x", 1, 9),
                Token::numeric("5", 1, 11),
                Token::close_paren(1, 12),
                Token::end_of_input(1, 13),
            ]
        );
    }

    #[test]
    fn test_numeric_grammar_is_not_validated() {
        assert_eq!(first_token("1--.5.3+"), Token::numeric("1--.5.3+", 1, 1));
    }

    #[test]
    fn test_numeric_stops_before_close_paren() {
        let mut scanner = Scanner::from_text("6)");
        assert_eq!(scanner.next_token().unwrap(), Token::numeric("6", 1, 1));
        assert_eq!(scanner.next_token().unwrap(), Token::close_paren(1, 2));
        assert!(scanner.next_token().unwrap().is_end());
    }

    #[test]
    fn test_identifier_absorbs_parens_by_default() {
        let tokens = Scanner::from_text("(f x)").drain().unwrap();
        assert_eq!(tokens[2], Token::ident("x)", 1, 4));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_identifier_stops_at_parens_when_configured() {
        let config = ScannerConfig::default().with_parens_ending_identifiers(true);
        let tokens = Scanner::with_config("(f x)".as_bytes(), config)
            .drain()
            .unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::open_paren(1, 1),
                Token::ident("f", 1, 2),
                Token::ident("x", 1, 4),
                Token::close_paren(1, 5),
                Token::end_of_input(1, 6),
            ]
        );
    }

    #[test]
    fn test_semicolon_is_invalid_token() {
        let err = Scanner::from_text("  ;").next_token().unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidToken {
                found: ';',
                line: 1,
                column: 3
            }
        );
    }

    #[test]
    fn test_invalid_continuations() {
        let err = Scanner::from_text("ab;c").next_token().unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidIdentifierChar {
                found: ';',
                partial: "ab".to_string(),
                line: 1,
                column: 3
            }
        );

        let err = Scanner::from_text("12x").next_token().unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidNumericChar {
                found: 'x',
                partial: "12".to_string(),
                line: 1,
                column: 3
            }
        );

        // `(` is not a numeric terminator
        let err = Scanner::from_text("1(").next_token().unwrap_err();
        assert!(matches!(err, LexError::InvalidNumericChar { found: '(', .. }));
    }

    #[test]
    fn test_carriage_return_ends_word_but_is_not_skipped() {
        let mut scanner = Scanner::from_text("abc\r\n");
        assert_eq!(scanner.next_token().unwrap(), Token::ident("abc", 1, 1));
        assert!(matches!(
            scanner.next_token(),
            Err(LexError::InvalidToken { found: '\r', line: 1, column: 4 })
        ));
    }

    #[test]
    fn test_end_of_input_is_idempotent() {
        let mut scanner = Scanner::from_text("x ");
        scanner.next_token().unwrap();
        let end = scanner.next_token().unwrap();
        assert_eq!(end, Token::end_of_input(1, 3));
        let position = scanner.position();
        assert_eq!(scanner.next_token().unwrap(), end);
        assert_eq!(scanner.next_token().unwrap(), end);
        assert_eq!(scanner.position(), position);
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(
            Scanner::from_text("").drain().unwrap(),
            vec![Token::end_of_input(1, 1)]
        );
        assert_eq!(
            Scanner::from_text(" \t\n").drain().unwrap(),
            vec![Token::end_of_input(2, 1)]
        );
    }

    #[test]
    fn test_peek_token_does_not_consume() {
        let mut scanner = Scanner::from_text("(a)");
        assert_eq!(scanner.peek_token().unwrap(), &Token::open_paren(1, 1));
        assert_eq!(scanner.peek_token().unwrap(), &Token::open_paren(1, 1));
        assert_eq!(scanner.next_token().unwrap(), Token::open_paren(1, 1));
        assert_eq!(scanner.next_token().unwrap(), Token::ident("a)", 1, 2));
    }

    #[test]
    fn test_failure_is_sticky() {
        let mut scanner = Scanner::from_text("a ; b");
        assert!(scanner.next_token().is_ok());
        let err = scanner.next_token().unwrap_err();
        assert_eq!(scanner.next_token().unwrap_err(), err);
        assert_eq!(scanner.peek_token().unwrap_err(), err);
    }

    #[test]
    fn test_drain_keeps_partial_tokens() {
        let err = Scanner::from_text("(foo 12a)").drain().unwrap_err();
        assert_eq!(
            err.tokens,
            vec![Token::open_paren(1, 1), Token::ident("foo", 1, 2)]
        );
        assert!(matches!(err.error, LexError::InvalidNumericChar { column: 8, .. }));
    }

    #[test]
    fn test_tokens_iterator_fuses() {
        let mut scanner = Scanner::from_text("(a b");
        let kinds: Vec<TokenKind> = scanner
            .tokens()
            .map(|t| t.unwrap().kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::OpenParen,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::EndOfInput
            ]
        );

        let mut scanner = Scanner::from_text("a ;");
        let mut tokens = scanner.tokens();
        assert!(tokens.next().unwrap().is_ok());
        assert!(tokens.next().unwrap().is_err());
        assert!(tokens.next().is_none());
    }

    #[test]
    fn test_column_resets_on_newline() {
        let tokens = Scanner::from_text("(a\n  b)").drain().unwrap();
        assert_eq!(tokens[1], Token::ident("a", 1, 2));
        assert_eq!(tokens[2], Token::ident("b)", 2, 3));
        assert_eq!(tokens[3], Token::end_of_input(2, 5));
    }

    #[test]
    fn test_continuous_columns() {
        let config = ScannerConfig::default().with_column_mode(ColumnMode::Continuous);
        let tokens = Scanner::with_config("(a\n  b)".as_bytes(), config)
            .drain()
            .unwrap();
        assert_eq!(tokens[1], Token::ident("a", 1, 2));
        assert_eq!(tokens[2], Token::ident("b)", 2, 6));
        assert_eq!(tokens[3], Token::end_of_input(2, 8));
    }

    #[test]
    fn test_custom_keywords() {
        let config = ScannerConfig::default()
            .with_keywords(KeywordSet::empty().with("defun").with("let*"));
        let tokens = Scanner::with_config("defun let* defvar".as_bytes(), config)
            .drain()
            .unwrap();
        assert_eq!(tokens[0].kind(), TokenKind::Keyword);
        assert_eq!(tokens[1].kind(), TokenKind::Keyword);
        assert_eq!(tokens[2].kind(), TokenKind::Ident);
    }

    #[test]
    fn test_position_counts_codepoints() {
        let mut scanner = Scanner::from_text("λx ");
        scanner.next_token().unwrap();
        assert_eq!(scanner.position(), 2);
        assert_eq!(scanner.column(), 3);
        scanner.next_token().unwrap();
        assert_eq!(scanner.position(), 3);
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let bytes: &[u8] = &[b'(', b'a', 0xFF];
        let err = Scanner::new(bytes).drain().unwrap_err();
        assert_eq!(err.tokens, vec![Token::open_paren(1, 1)]);
        assert!(err.error.is_unreadable());
        assert_eq!((err.error.line(), err.error.column()), (1, 3));
    }
}
