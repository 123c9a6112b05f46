use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::chars;

/// Reserved words that scan as [`TokenKind::Keyword`](super::TokenKind::Keyword)
///
/// The default set holds `defvar` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet {
    words: BTreeSet<String>,
}

impl KeywordSet {
    /// Keywords shipped with the language
    pub const DEFAULT: &'static [&'static str] = &["defvar"];

    /// A set with no reserved words
    pub fn empty() -> Self {
        KeywordSet {
            words: BTreeSet::new(),
        }
    }

    /// Adds a reserved word
    pub fn with(mut self, word: impl Into<String>) -> Self {
        self.words.insert(word.into());
        self
    }

    /// Whether `word` is reserved
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of reserved words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether nothing is reserved
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Reserved words in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// First word that the identifier scan could never produce
    pub(crate) fn first_unscannable(&self) -> Option<&str> {
        self.iter().find(|word| {
            let mut rest = word.chars();
            match rest.next() {
                Some(first) => !chars::is_ident_start(first) || !rest.all(chars::is_ident_continue),
                None => true,
            }
        })
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::DEFAULT.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        KeywordSet {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
