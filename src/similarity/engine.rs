use tracing::{debug, info, warn};

use crate::device::select_device;

use super::SimilarityBackend;
use super::accelerated::AcceleratedTfidf;
use super::config::{BackendPreference, SimilarityConfig};
use super::pure::PureTfidf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which backend produced a set of scores.
pub enum ScoringPath {
    Accelerated,
    Pure,
    /// No documents, nothing was vectorized.
    Skipped,
}

impl ScoringPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringPath::Accelerated => "accelerated",
            ScoringPath::Pure => "pure",
            ScoringPath::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Scores for one corpus, parallel to the input documents.
pub struct ScoredCorpus {
    pub scores: Vec<f64>,
    pub path: ScoringPath,
}

/// Chooses between the accelerated and pure backends for every call.
pub struct SimilarityEngine {
    accelerated: Option<Box<dyn SimilarityBackend>>,
    pure: PureTfidf,
}

impl std::fmt::Debug for SimilarityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityEngine")
            .field(
                "accelerated",
                &self.accelerated.as_ref().map(|backend| backend.name()),
            )
            .finish()
    }
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::load(&SimilarityConfig::default())
    }
}

impl SimilarityEngine {
    /// Builds the engine; an accelerated backend that fails to initialize is dropped.
    pub fn load(config: &SimilarityConfig) -> Self {
        let accelerated = match config.backend {
            BackendPreference::Pure => {
                info!("Similarity engine configured for pure backend only");
                None
            }
            BackendPreference::Auto => match AcceleratedTfidf::load(config, select_device()) {
                Ok(backend) => {
                    info!(
                        max_features = backend.max_features(),
                        "Accelerated similarity backend ready"
                    );
                    Some(Box::new(backend) as Box<dyn SimilarityBackend>)
                }
                Err(e) => {
                    warn!(error = %e, "Accelerated similarity backend unavailable, using pure backend");
                    None
                }
            },
        };

        Self {
            accelerated,
            pure: PureTfidf::new(),
        }
    }

    pub fn pure_only() -> Self {
        Self {
            accelerated: None,
            pure: PureTfidf::new(),
        }
    }

    /// Uses `backend` as the preferred path, keeping pure as the fallback.
    pub fn with_backend(backend: Box<dyn SimilarityBackend>) -> Self {
        Self {
            accelerated: Some(backend),
            pure: PureTfidf::new(),
        }
    }

    pub fn has_accelerated(&self) -> bool {
        self.accelerated.is_some()
    }

    /// Scores `documents` against `query`, never failing.
    pub fn score(&self, query: &str, documents: &[&str]) -> ScoredCorpus {
        if documents.is_empty() {
            return ScoredCorpus {
                scores: Vec::new(),
                path: ScoringPath::Skipped,
            };
        }

        if let Some(backend) = &self.accelerated {
            match backend.similarities(query, documents) {
                Ok(scores) if scores.len() == documents.len() => {
                    return ScoredCorpus {
                        scores,
                        path: ScoringPath::Accelerated,
                    };
                }
                Ok(scores) => {
                    debug!(
                        backend = backend.name(),
                        expected = documents.len(),
                        actual = scores.len(),
                        "Backend returned wrong score count, degrading to pure"
                    );
                }
                Err(e) => {
                    debug!(backend = backend.name(), error = %e, "Degrading to pure backend");
                }
            }
        }

        ScoredCorpus {
            scores: self.pure.compute(query, documents),
            path: ScoringPath::Pure,
        }
    }
}
