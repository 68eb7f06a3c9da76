use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("similarity backend unavailable: {reason}")]
    Unavailable { reason: String },
}

impl From<candle_core::Error> for SimilarityError {
    fn from(err: candle_core::Error) -> Self {
        SimilarityError::Unavailable {
            reason: err.to_string(),
        }
    }
}
