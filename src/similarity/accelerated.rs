use std::collections::HashMap;

use candle_core::{DType, Device, Tensor};
use tracing::debug;

use super::SimilarityBackend;
use super::config::SimilarityConfig;
use super::error::SimilarityError;
use super::tfidf::{clamp_unit, document_frequencies, smooth_idf, sublinear_tf, term_counts};
use super::tokenize::analyze;

/// Tensor-backed TF-IDF over word n-grams with a capped vocabulary.
pub struct AcceleratedTfidf {
    device: Device,
    max_features: usize,
    ngram_range: (usize, usize),
}

impl std::fmt::Debug for AcceleratedTfidf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcceleratedTfidf")
            .field("device", &format!("{:?}", self.device))
            .field("max_features", &self.max_features)
            .field("ngram_range", &self.ngram_range)
            .finish()
    }
}

impl AcceleratedTfidf {
    /// Builds the backend and probes the device with a tiny allocation.
    pub fn load(config: &SimilarityConfig, device: Device) -> Result<Self, SimilarityError> {
        if let Err(reason) = config.validate() {
            return Err(SimilarityError::Unavailable { reason });
        }

        Tensor::zeros((1, 1), DType::F32, &device)?;

        Ok(Self {
            device,
            max_features: config.max_features,
            ngram_range: config.ngram_range,
        })
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    pub fn compute(&self, query: &str, documents: &[&str]) -> Result<Vec<f64>, SimilarityError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let corpus: Vec<HashMap<String, u32>> = std::iter::once(query)
            .chain(documents.iter().copied())
            .map(|text| term_counts(analyze(text, self.ngram_range, true)))
            .collect();

        let vocabulary = self.fit_vocabulary(&corpus);
        if vocabulary.is_empty() {
            return Err(SimilarityError::Unavailable {
                reason: "empty vocabulary".to_string(),
            });
        }

        let rows = corpus.len();
        let cols = vocabulary.len();
        let weights = weight_matrix(&corpus, &vocabulary);

        debug!(rows, cols, "Built TF-IDF matrix");

        let matrix = Tensor::from_vec(weights, (rows, cols), &self.device)?;
        let norms = matrix
            .sqr()?
            .sum_keepdim(1)?
            .sqrt()?
            .clamp(f32::MIN_POSITIVE, f32::MAX)?;
        let normalized = matrix.broadcast_div(&norms)?;

        let query_row = normalized.narrow(0, 0, 1)?.t()?.contiguous()?;
        let document_rows = normalized.narrow(0, 1, rows - 1)?;
        let sims = document_rows
            .matmul(&query_row)?
            .flatten_all()?
            .to_vec1::<f32>()?;

        if sims.len() != documents.len() {
            return Err(SimilarityError::Unavailable {
                reason: format!(
                    "expected {} scores, computed {}",
                    documents.len(),
                    sims.len()
                ),
            });
        }

        if let Some(bad) = sims.iter().find(|s| !s.is_finite()) {
            return Err(SimilarityError::Unavailable {
                reason: format!("non-finite similarity {}", bad),
            });
        }

        Ok(sims.into_iter().map(|s| clamp_unit(f64::from(s))).collect())
    }

    /// Keeps the `max_features` most frequent terms (corpus-wide counts), ties
    /// broken alphabetically, and assigns columns in alphabetical order.
    fn fit_vocabulary<'a>(&self, corpus: &'a [HashMap<String, u32>]) -> HashMap<&'a str, usize> {
        let mut totals: HashMap<&str, u64> = HashMap::new();
        for counts in corpus {
            for (term, &tf) in counts {
                *totals.entry(term.as_str()).or_insert(0) += u64::from(tf);
            }
        }

        let mut ranked: Vec<(&str, u64)> = totals.into_iter().collect();
        if ranked.len() > self.max_features {
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            ranked.truncate(self.max_features);
        }

        let mut terms: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        terms
            .into_iter()
            .enumerate()
            .map(|(column, term)| (term, column))
            .collect()
    }
}

impl SimilarityBackend for AcceleratedTfidf {
    fn name(&self) -> &'static str {
        "accelerated"
    }

    fn similarities(&self, query: &str, documents: &[&str]) -> Result<Vec<f64>, SimilarityError> {
        self.compute(query, documents)
    }
}

/// Row-major `[corpus, vocabulary]` TF-IDF weights (unnormalized).
fn weight_matrix(corpus: &[HashMap<String, u32>], vocabulary: &HashMap<&str, usize>) -> Vec<f32> {
    let rows = corpus.len();
    let cols = vocabulary.len();

    let df = document_frequencies(corpus);
    let mut idf = vec![0.0f64; cols];
    for (term, &column) in vocabulary {
        idf[column] = smooth_idf(rows, df.get(term).copied().unwrap_or(0));
    }

    let mut weights = vec![0.0f32; rows * cols];
    for (row, counts) in corpus.iter().enumerate() {
        for (term, &tf) in counts {
            if let Some(&column) = vocabulary.get(term.as_str()) {
                weights[row * cols + column] = (sublinear_tf(tf) * idf[column]) as f32;
            }
        }
    }
    weights
}
