//! Drives a dispatcher through the line loop with in-memory streams.

use std::sync::Arc;

use serde_json::Value;

use triage::classifier::{MockClassifier, OutputClassifier};
use triage::labels::OutputLabel;
use triage::similarity::{SimilarityConfig, SimilarityEngine};
use triage::worker::{Dispatcher, ServeStats, serve};

pub struct Transcript {
    pub raw: String,
    pub stats: ServeStats,
}

impl Transcript {
    pub fn lines(&self) -> Vec<&str> {
        self.raw.lines().collect()
    }

    pub fn responses(&self) -> Vec<Value> {
        self.raw
            .lines()
            .map(|line| serde_json::from_str(line).expect("response should be JSON"))
            .collect()
    }
}

/// Feeds `input` (already newline-framed) through [`serve`].
pub async fn run(dispatcher: &Dispatcher, input: &str) -> Transcript {
    let mut output = Vec::new();
    let stats = serve(dispatcher, input.as_bytes(), &mut output)
        .await
        .expect("in-memory streams should not fail");
    Transcript {
        raw: String::from_utf8(output).expect("responses should be UTF-8"),
        stats,
    }
}

/// Joins requests into newline-framed input.
pub fn frame(requests: &[Value]) -> String {
    requests
        .iter()
        .map(|request| format!("{}\n", request))
        .collect()
}

pub fn mock_classifier(pairs: &[(OutputLabel, f32)]) -> Arc<dyn OutputClassifier> {
    Arc::new(MockClassifier::with_scores(pairs.iter().copied()))
}

/// Dispatcher over the default (accelerated, degrading) similarity engine.
pub fn dispatcher(classifier: Option<Arc<dyn OutputClassifier>>) -> Dispatcher {
    Dispatcher::new(classifier, SimilarityEngine::default())
}

/// Dispatcher restricted to the pure similarity backend.
pub fn pure_dispatcher(classifier: Option<Arc<dyn OutputClassifier>>) -> Dispatcher {
    Dispatcher::new(classifier, SimilarityEngine::load(&SimilarityConfig::pure()))
}
