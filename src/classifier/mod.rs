//! Multi-label output-type classifier.
//!
//! The worker only needs an [`OutputClassifier`]: something that turns a prompt into a
//! feature vector and a feature vector into per-label probabilities. The production
//! implementation is [`LinearClassifier`], a TF-IDF vectorizer followed by one logistic
//! head per label, loaded from an artifact directory:
//!
//! ```text
//! <model_dir>/
//!   config.json        {"labels": ["text", "picture", ...]}
//!   vectorizer.json    {"vocabulary": {...}, "idf": [...], "ngram_range": [1, 2], ...}
//!   model.safetensors  classifier.weight [L, V], classifier.bias [L]
//! ```
//!
//! A missing or broken artifact is not fatal: [`load_classifier`] returns `None` and the
//! worker answers classification requests in bypass mode.

pub mod config;
pub mod error;
pub mod linear;
pub mod types;
pub mod vectorizer;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


use std::sync::Arc;

use tracing::{info, warn};

pub use config::ClassifierConfig;
pub use error::ClassifierError;
pub use linear::LinearClassifier;
pub use types::FeatureVector;
pub use vectorizer::{TfidfVectorizer, VectorizerArtifact};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockClassifier;

use crate::labels::LabelScores;

/// Prompt → per-label probability capability.
///
/// Implementations are read-only after construction and shared across requests.
pub trait OutputClassifier: Send + Sync {
    fn transform(&self, prompt: &str) -> Result<FeatureVector, ClassifierError>;

    fn predict_proba(&self, features: &FeatureVector) -> Result<LabelScores, ClassifierError>;

    /// `transform` followed by `predict_proba`.
    fn score(&self, prompt: &str) -> Result<LabelScores, ClassifierError> {
        let features = self.transform(prompt)?;
        self.predict_proba(&features)
    }
}

/// Loads the configured classifier, or `None` for bypass mode.
pub fn load_classifier(config: &ClassifierConfig) -> Option<Arc<dyn OutputClassifier>> {
    if let Err(reason) = config.validate() {
        warn!(reason = %reason, "Invalid classifier configuration, running in bypass mode");
        return None;
    }

    let Some(model_path) = config.model_path.as_deref() else {
        info!("No classifier model configured, running in bypass mode");
        return None;
    };

    match LinearClassifier::load(model_path) {
        Ok(classifier) => {
            info!(
                model_path = %model_path.display(),
                labels = classifier.labels().len(),
                features = classifier.feature_dim(),
                "Classifier loaded"
            );
            Some(Arc::new(classifier))
        }
        Err(e) => {
            warn!(
                model_path = %model_path.display(),
                error = %e,
                "Classifier unavailable, running in bypass mode"
            );
            None
        }
    }
}
