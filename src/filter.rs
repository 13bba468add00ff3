//! Vocabulary acceptance predicates applied to a freshly loaded store

use std::collections::HashSet;

/// Characters whose presence marks a vocabulary entry as noise: brackets,
/// Japanese quotation marks, and list punctuation left over from tokenizing.
pub const DEFAULT_REJECTED_CHARS: &[char] = &[
    '[', ']', '「', '」', '『', '』', '(', ')', '（', '）', '、', '。', '*', ':',
];

/// Decides whether a vocabulary word is kept.
pub trait VocabularyFilter {
    /// Return `true` to keep `word` in the store.
    fn accept(&self, word: &str) -> bool;
}

impl<F> VocabularyFilter for F
where
    F: Fn(&str) -> bool,
{
    fn accept(&self, word: &str) -> bool {
        self(word)
    }
}

/// Rejects any word containing one of a set of characters.
#[derive(Debug, Clone)]
pub struct CharsetFilter {
    rejected: HashSet<char>,
}

impl CharsetFilter {
    pub fn new(rejected: impl IntoIterator<Item = char>) -> Self {
        Self {
            rejected: rejected.into_iter().collect(),
        }
    }
}

impl Default for CharsetFilter {
    fn default() -> Self {
        Self::new(DEFAULT_REJECTED_CHARS.iter().copied())
    }
}

impl VocabularyFilter for CharsetFilter {
    fn accept(&self, word: &str) -> bool {
        !word.chars().any(|c| self.rejected.contains(&c))
    }
}
