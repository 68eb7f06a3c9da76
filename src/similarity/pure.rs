use std::collections::{BTreeMap, HashMap};

use super::SimilarityBackend;
use super::error::SimilarityError;
use super::tfidf::{clamp_unit, document_frequencies, smooth_idf, sublinear_tf, term_counts};
use super::tokenize::whitespace_tokens;

/// Dependency-free TF-IDF backend over whitespace unigrams.
#[derive(Debug, Clone, Copy, Default)]
pub struct PureTfidf;

impl PureTfidf {
    pub fn new() -> Self {
        Self
    }

    /// Scores every document against `query`. Infallible.
    pub fn compute(&self, query: &str, documents: &[&str]) -> Vec<f64> {
        if documents.is_empty() {
            return Vec::new();
        }

        let corpus: Vec<HashMap<String, u32>> = std::iter::once(query)
            .chain(documents.iter().copied())
            .map(|text| term_counts(whitespace_tokens(text)))
            .collect();

        let corpus_size = corpus.len();
        let df = document_frequencies(&corpus);

        let vectors: Vec<BTreeMap<&str, f64>> = corpus
            .iter()
            .map(|counts| {
                let mut vector: BTreeMap<&str, f64> = counts
                    .iter()
                    .map(|(term, &tf)| {
                        let frequency = df.get(term.as_str()).copied().unwrap_or(0);
                        let idf = smooth_idf(corpus_size, frequency);
                        (term.as_str(), sublinear_tf(tf) * idf)
                    })
                    .collect();
                normalize(&mut vector);
                vector
            })
            .collect();

        let Some((query_vector, document_vectors)) = vectors.split_first() else {
            return Vec::new();
        };
        document_vectors
            .iter()
            .map(|doc| clamp_unit(dot(query_vector, doc)))
            .collect()
    }
}

impl SimilarityBackend for PureTfidf {
    fn name(&self) -> &'static str {
        "pure"
    }

    fn similarities(&self, query: &str, documents: &[&str]) -> Result<Vec<f64>, SimilarityError> {
        Ok(self.compute(query, documents))
    }
}

/// L2-normalize a sparse vector in place; all-zero vectors stay zero.
fn normalize(vector: &mut BTreeMap<&str, f64>) {
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
}

fn dot(a: &BTreeMap<&str, f64>, b: &BTreeMap<&str, f64>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(term, weight)| large.get(term).map(|other| weight * other))
        .sum()
}
