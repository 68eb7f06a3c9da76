use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::similarity::DEFAULT_NGRAM_RANGE;
use crate::similarity::tfidf::{sublinear_tf, term_counts};
use crate::similarity::tokenize::analyze;

use super::error::ClassifierError;
use super::types::FeatureVector;

fn default_ngram_range() -> (usize, usize) {
    DEFAULT_NGRAM_RANGE
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
/// On-disk form of a fitted vectorizer (`vectorizer.json`).
pub struct VectorizerArtifact {
    pub vocabulary: HashMap<String, usize>,

    pub idf: Vec<f32>,

    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    #[serde(default = "default_true")]
    pub sublinear_tf: bool,

    #[serde(default = "default_true")]
    pub lowercase: bool,
}

/// Fitted TF-IDF vectorizer for classifier input.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    lowercase: bool,
}

impl TfidfVectorizer {
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let content = std::fs::read_to_string(path)?;
        let artifact: VectorizerArtifact = serde_json::from_str(&content)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, ClassifierError> {
        let VectorizerArtifact {
            vocabulary,
            idf,
            ngram_range,
            sublinear_tf,
            lowercase,
        } = artifact;

        if idf.is_empty() {
            return Err(ClassifierError::InvalidArtifact {
                reason: "idf vector is empty".to_string(),
            });
        }

        if let Some((term, &column)) = vocabulary.iter().find(|&(_, &column)| column >= idf.len()) {
            return Err(ClassifierError::InvalidArtifact {
                reason: format!(
                    "term '{}' maps to column {} but idf has {} entries",
                    term,
                    column,
                    idf.len()
                ),
            });
        }

        if idf.iter().any(|w| !w.is_finite()) {
            return Err(ClassifierError::InvalidArtifact {
                reason: "idf contains non-finite values".to_string(),
            });
        }

        let (min_n, max_n) = ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ClassifierError::InvalidArtifact {
                reason: format!("invalid ngram_range ({}, {})", min_n, max_n),
            });
        }

        Ok(Self {
            vocabulary,
            idf,
            ngram_range,
            sublinear_tf,
            lowercase,
        })
    }

    /// Feature width.
    pub fn dim(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// L2-normalized TF-IDF features of `text`; out-of-vocabulary text yields an empty vector.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let counts = term_counts(analyze(text, self.ngram_range, self.lowercase));

        let mut entries: Vec<(usize, f32)> = counts
            .iter()
            .filter_map(|(term, &count)| {
                let column = *self.vocabulary.get(term)?;
                let tf = if self.sublinear_tf {
                    sublinear_tf(count)
                } else {
                    f64::from(count)
                };
                Some((column, (tf * f64::from(self.idf[column])) as f32))
            })
            .collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, weight) in entries.iter_mut() {
                *weight /= norm;
            }
        }

        FeatureVector::new(self.dim(), entries)
    }
}
