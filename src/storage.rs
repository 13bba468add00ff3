//! In-memory vector storage

use crate::distance::Metric;
use crate::error::Result;
use crate::filter::VocabularyFilter;
use crate::rank::{self, Entry};
use crate::vector::Vector;
use tracing::debug;

/// Ordered, append-only collection of word vectors.
///
/// Entries keep file order. Words are not required to be unique; lookups
/// return the first match.
#[derive(Debug, Clone, Default)]
pub struct VectorStore {
    entries: Vec<Vector>,
}

impl VectorStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append a vector after all existing entries
    pub fn push(&mut self, vector: Vector) {
        self.entries.push(vector);
    }

    /// Find the first vector whose word equals `word`
    pub fn find(&self, word: &str) -> Option<&Vector> {
        self.entries.iter().find(|v| v.word() == word)
    }

    /// Get the number of vectors in the store
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Vector> {
        self.entries.iter()
    }

    /// All words in insertion order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|v| v.word())
    }

    /// Dimension of the first entry, if any
    pub fn dimension(&self) -> Option<usize> {
        self.entries.first().map(|v| v.dimension())
    }

    /// Consume the store and keep only the entries `filter` accepts
    pub fn filter<F: VocabularyFilter + ?Sized>(self, filter: &F) -> VectorStore {
        let before = self.entries.len();
        let entries: Vec<Vector> = self
            .entries
            .into_iter()
            .filter(|v| filter.accept(v.word()))
            .collect();
        debug!(
            kept = entries.len(),
            removed = before - entries.len(),
            "filtered vocabulary"
        );
        VectorStore { entries }
    }

    /// Entries ordered by ascending Euclidean distance to `query`
    pub fn neighbourhood(&self, query: &Vector) -> Result<Vec<Entry<'_>>> {
        rank::neighbourhood(self, Some(query))
    }

    /// Entries ordered by descending cosine similarity to `query`
    pub fn cosine_similars(&self, query: &Vector) -> Result<Vec<Entry<'_>>> {
        rank::cosine_similars(self, Some(query))
    }

    /// The `k` best matches for `query` under `metric`
    pub fn search(&self, query: &Vector, metric: Metric, k: usize) -> Result<Vec<Entry<'_>>> {
        let mut results = rank::rank_by(self, Some(query), metric)?;
        results.truncate(k);
        Ok(results)
    }
}

impl FromIterator<Vector> for VectorStore {
    fn from_iter<T: IntoIterator<Item = Vector>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a VectorStore {
    type Item = &'a Vector;
    type IntoIter = std::slice::Iter<'a, Vector>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for VectorStore {
    type Item = Vector;
    type IntoIter = std::vec::IntoIter<Vector>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
