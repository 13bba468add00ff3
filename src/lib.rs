//! # wordvec
//!
//! Load pretrained word2vec embeddings and explore them with word arithmetic.
//!
//! This library provides:
//! - Text and binary (32/64-bit) model readers
//! - Vector composition, normalization, Euclidean distance and cosine similarity
//! - Exhaustive ranking of the vocabulary that skips a query's own words
//! - A small `word + word - word` query language
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use wordvec::format::{load, LoadOptions};
//! use wordvec::query::Evaluator;
//!
//! let model = "king 1.0 1.0\nman 1.0 0.0\nwoman 0.0 1.0\nqueen 0.1 1.9\n";
//! let store = load(Cursor::new(model), &LoadOptions::default()).unwrap();
//!
//! let mut query = Evaluator::new(&store).evaluate("king - man + woman").unwrap();
//! query.normalize();
//!
//! let results = store.cosine_similars(&query).unwrap();
//! assert_eq!(results[0].word(), "queen");
//! ```

pub mod distance;
pub mod error;
pub mod filter;
pub mod format;
pub mod query;
pub mod rank;
pub mod storage;
pub mod vector;

pub use distance::{cosine_similarity, euclidean_distance, Metric};
pub use error::{Result, WordVecError};
pub use filter::{CharsetFilter, VocabularyFilter};
pub use format::{load, load_path, Format, LoadOptions};
pub use query::Evaluator;
pub use rank::Entry;
pub use storage::VectorStore;
pub use vector::Vector;
