//! Word vector type and composition

use std::collections::HashSet;
use std::fmt;
use std::ops::{Add, Sub};

/// An embedding, either loaded from a model or composed from other vectors.
///
/// `provenance` holds the vocabulary words that contributed to the vector:
/// just the word itself for a loaded entry, the union of both operands for
/// a composite. Ranking uses it to keep a query from matching its own inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    word: String,
    values: Vec<f64>,
    provenance: HashSet<String>,
}

impl Vector {
    /// Create a vocabulary entry whose provenance is its own word
    pub fn new(word: impl Into<String>, values: Vec<f64>) -> Self {
        let word = word.into();
        let provenance = HashSet::from([word.clone()]);
        Self {
            word,
            values,
            provenance,
        }
    }

    fn composite(word: String, values: Vec<f64>, provenance: HashSet<String>) -> Self {
        Self {
            word,
            values,
            provenance,
        }
    }

    /// Display label; an expression such as `"king + woman"` for composites
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Get the underlying values as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get the dimension of the vector
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Vocabulary words this vector was built from
    pub fn provenance(&self) -> &HashSet<String> {
        &self.provenance
    }

    /// Whether `word` contributed to this vector
    pub fn derives_from(&self, word: &str) -> bool {
        self.provenance.contains(word)
    }

    /// Compute the L2 norm (magnitude) of the vector
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Scale the vector to unit length in place.
    ///
    /// A zero vector divides by zero and ends up with NaN components.
    pub fn normalize(&mut self) -> &mut Self {
        let scale = 1.0 / self.norm();
        for x in &mut self.values {
            *x *= scale;
        }
        self
    }

    /// Create a normalized copy of the vector
    pub fn normalized(&self) -> Vector {
        let mut v = self.clone();
        v.normalize();
        v
    }

    fn combine(&self, op: &str, other: &Vector, f: impl Fn(f64, f64) -> f64) -> Vector {
        let values = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        let provenance = self
            .provenance
            .union(&other.provenance)
            .cloned()
            .collect();
        Vector::composite(
            format!("{} {} {}", self.word, op, other.word),
            values,
            provenance,
        )
    }
}

/// Add two optional operands. An absent side yields the other side unchanged.
pub fn add(lhs: Option<Vector>, rhs: Option<Vector>) -> Option<Vector> {
    match (lhs, rhs) {
        (Some(lhs), Some(rhs)) => Some(&lhs + &rhs),
        (lhs, None) => lhs,
        (None, rhs) => rhs,
    }
}

/// Subtract `rhs` from `lhs`.
///
/// An absent `rhs` yields `lhs` unchanged. An absent `lhs` behaves as an
/// unnamed zero vector, so the result is `-rhs` labelled `" - rhs"`.
pub fn sub(lhs: Option<Vector>, rhs: Option<Vector>) -> Option<Vector> {
    match (lhs, rhs) {
        (Some(lhs), Some(rhs)) => Some(&lhs - &rhs),
        (lhs, None) => lhs,
        (None, Some(rhs)) => {
            let zeros = vec![0.0; rhs.dimension()];
            let zero = Vector::composite(String::new(), zeros, HashSet::new());
            Some(&zero - &rhs)
        }
    }
}

// Mismatched lengths keep the common prefix; the longer operand's tail is dropped.
impl Add for &Vector {
    type Output = Vector;

    fn add(self, other: &Vector) -> Vector {
        self.combine("+", other, |a, b| a + b)
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, other: &Vector) -> Vector {
        self.combine("-", other, |a, b| a - b)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        &self + &other
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Vector {
        &self - &other
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.word)?;
        for (i, x) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}
