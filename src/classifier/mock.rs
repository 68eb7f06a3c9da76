//! Fixed-output classifier for tests.

use crate::labels::{LabelScores, OutputLabel};

use super::OutputClassifier;
use super::error::ClassifierError;
use super::types::FeatureVector;

#[derive(Debug, Clone)]
pub struct MockClassifier {
    scores: LabelScores,
    failure: Option<String>,
}

impl MockClassifier {
    /// Returns `scores` for every prompt.
    pub fn new(scores: LabelScores) -> Self {
        Self {
            scores,
            failure: None,
        }
    }

    /// Named labels get their score, the rest `0.0`.
    pub fn with_scores<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (OutputLabel, f32)>,
    {
        Self::new(LabelScores::from_pairs(pairs))
    }

    /// Fails every inference with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            scores: LabelScores::default(),
            failure: Some(reason.into()),
        }
    }
}

impl OutputClassifier for MockClassifier {
    fn transform(&self, _prompt: &str) -> Result<FeatureVector, ClassifierError> {
        Ok(FeatureVector::empty(0))
    }

    fn predict_proba(&self, _features: &FeatureVector) -> Result<LabelScores, ClassifierError> {
        match &self.failure {
            Some(reason) => Err(ClassifierError::InferenceFailed {
                reason: reason.clone(),
            }),
            None => Ok(self.scores),
        }
    }
}
