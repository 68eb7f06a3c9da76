//! TF-IDF cosine similarity between a query and a small, per-request corpus.
//!
//! The corpus is the query plus every document. Each item becomes a TF-IDF vector
//! (sublinear tf `1 + ln(tf)`, smoothed idf `ln((M + 1) / (df + 1)) + 1`) normalized
//! to unit length, and a document's score is its dot product with the query vector.
//!
//! Two backends implement the same contract:
//!
//! - [`AcceleratedTfidf`] - candle tensors, word unigrams + bigrams, vocabulary capped
//!   to the most frequent n-grams.
//! - [`PureTfidf`] - ordered sparse maps over lower-cased whitespace tokens, no cap. Never fails.
//!
//! [`SimilarityEngine`] prefers the accelerated backend and degrades to the pure one
//! whenever the former reports [`SimilarityError::Unavailable`].

pub mod accelerated;
pub mod config;
pub mod engine;
pub mod error;
pub mod pure;
pub mod tfidf;
pub mod tokenize;


pub use accelerated::AcceleratedTfidf;
pub use config::{BackendPreference, DEFAULT_NGRAM_RANGE, SimilarityConfig};
pub use engine::{ScoredCorpus, ScoringPath, SimilarityEngine};
pub use error::SimilarityError;
pub use pure::PureTfidf;

/// A strategy that scores documents against a query.
///
/// Implementations return exactly one score per document, in input order, each in `[0, 1]`.
pub trait SimilarityBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn similarities(&self, query: &str, documents: &[&str]) -> Result<Vec<f64>, SimilarityError>;
}
