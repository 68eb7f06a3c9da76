use thiserror::Error;

use crate::classifier::ClassifierError;

/// Failure of a single request. Rendered as `{"error": "<message>"}`; never ends the loop.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unknown task: {0}")]
    UnknownTask(String),

    #[error("classification failed: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("similarity scoring timed out after {0}ms")]
    ScoringTimedOut(u128),

    #[error("similarity scoring failed: {0}")]
    ScoringFailed(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
