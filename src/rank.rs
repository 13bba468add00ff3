//! Exhaustive ranking of a store against a query vector

use crate::distance::{self, Metric};
use crate::error::Result;
use crate::storage::VectorStore;
use crate::vector::Vector;
use std::cmp::Ordering;
use std::fmt;

/// A store entry paired with its score against some query
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub vector: &'a Vector,
    pub score: f64,
}

impl<'a> Entry<'a> {
    pub fn word(&self) -> &'a str {
        self.vector.word()
    }
}

impl fmt::Display for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.vector, self.score)
    }
}

/// Score every entry of `store` and sort the survivors with `order`.
///
/// Entries named like the query, or named like any word in the query's
/// provenance, are skipped. The sort is stable, so ties keep store order.
/// An empty store or an absent query yields no entries.
pub fn rank<'a, S, O>(
    store: &'a VectorStore,
    query: Option<&Vector>,
    mut score: S,
    mut order: O,
) -> Result<Vec<Entry<'a>>>
where
    S: FnMut(&Vector) -> Result<f64>,
    O: FnMut(&Entry<'a>, &Entry<'a>) -> Ordering,
{
    let query = match query {
        Some(query) if !store.is_empty() => query,
        _ => return Ok(Vec::new()),
    };

    let mut entries = store
        .iter()
        .filter(|v| v.word() != query.word() && !query.derives_from(v.word()))
        .map(|v| -> Result<Entry<'a>> {
            Ok(Entry {
                vector: v,
                score: score(v)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    entries.sort_by(|a, b| order(a, b));
    Ok(entries)
}

/// Rank with one of the built-in metrics
pub fn rank_by<'a>(
    store: &'a VectorStore,
    query: Option<&Vector>,
    metric: Metric,
) -> Result<Vec<Entry<'a>>> {
    match query {
        Some(q) => rank(
            store,
            query,
            |v| metric.score(q, v),
            |a, b| metric.compare(a.score, b.score),
        ),
        None => Ok(Vec::new()),
    }
}

/// Entries by ascending Euclidean distance, nearest first
pub fn neighbourhood<'a>(
    store: &'a VectorStore,
    query: Option<&Vector>,
) -> Result<Vec<Entry<'a>>> {
    rank_by(store, query, Metric::Euclidean)
}

/// Entries by descending cosine similarity, most similar first
pub fn cosine_similars<'a>(
    store: &'a VectorStore,
    query: Option<&Vector>,
) -> Result<Vec<Entry<'a>>> {
    match query {
        Some(q) => rank(
            store,
            query,
            |v| Ok(distance::cosine_similarity(q, v)),
            |a, b| distance::descending(a.score, b.score),
        ),
        None => Ok(Vec::new()),
    }
}
