//! Distance and similarity metrics between word vectors

use crate::error::{Result, WordVecError};
use crate::vector::Vector;
use std::cmp::Ordering;

/// Scoring metrics used to rank the vocabulary against a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// Euclidean (L2) distance, nearest first
    Euclidean,
    /// Cosine similarity, most similar first
    #[default]
    Cosine,
}

impl Metric {
    /// Score `candidate` against `query` using this metric
    pub fn score(&self, query: &Vector, candidate: &Vector) -> Result<f64> {
        match self {
            Metric::Euclidean => euclidean_distance(query, candidate),
            Metric::Cosine => Ok(cosine_similarity(query, candidate)),
        }
    }

    /// Order two scores so that the best match comes first.
    /// NaN scores always sort last.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        match self {
            Metric::Euclidean => ascending(a, b),
            Metric::Cosine => descending(a, b),
        }
    }
}

/// Smaller scores first, NaN last
pub fn ascending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.total_cmp(&b),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    }
}

/// Larger scores first, NaN last
pub fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.total_cmp(&a),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    }
}

/// Compute Euclidean (L2) distance between two vectors of equal length
pub fn euclidean_distance(v1: &Vector, v2: &Vector) -> Result<f64> {
    if v1.dimension() != v2.dimension() {
        return Err(WordVecError::LengthMismatch {
            expected: v2.dimension(),
            actual: v1.dimension(),
        });
    }
    Ok(v1
        .as_slice()
        .iter()
        .zip(v2.as_slice().iter())
        .map(|(a, b)| (b - a).powi(2))
        .sum::<f64>()
        .sqrt())
}

/// Compute cosine similarity between two vectors.
///
/// Lengths may differ: the dot product covers the shared prefix while each
/// magnitude covers its whole vector, as if the shorter one were padded with
/// zeros. Returns 0.0 when either magnitude is zero.
pub fn cosine_similarity(v1: &Vector, v2: &Vector) -> f64 {
    let (a, b) = (v1.as_slice(), v2.as_slice());
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let sq1: f64 = a.iter().map(|x| x * x).sum();
    let sq2: f64 = b.iter().map(|x| x * x).sum();

    if sq1 == 0.0 || sq2 == 0.0 {
        return 0.0;
    }
    dot / (sq1.sqrt() * sq2.sqrt())
}
