use std::sync::Arc;
use std::time::Duration;

use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use crate::activation::ActivationPolicy;
use crate::classifier::OutputClassifier;
use crate::config::Config;
use crate::constants::{DEFAULT_SCORING_TIMEOUT_MS, selection_note};
use crate::hashing::prompt_fingerprint;
use crate::inventory::{DocumentLoader, InventoryItem};
use crate::selection::RetrievalSelector;
use crate::similarity::SimilarityEngine;

use super::error::WorkerError;
use super::protocol::{ClassificationResponse, Request, Response, RetrievalResponse};

/// Routes parsed requests to classification or retrieval.
///
/// Holds the process-lifetime state: the classifier (absent in bypass mode) and the
/// similarity engine. Everything else is request-scoped.
pub struct Dispatcher {
    classifier: Option<Arc<dyn OutputClassifier>>,
    policy: ActivationPolicy,
    engine: Arc<SimilarityEngine>,
    selector: RetrievalSelector,
    loader: DocumentLoader,
    scoring_timeout: Duration,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("bypass", &self.is_bypassed())
            .field("policy", &self.policy)
            .field("engine", &self.engine)
            .field("selector", &self.selector)
            .field("loader", &self.loader)
            .field("scoring_timeout", &self.scoring_timeout)
            .finish()
    }
}

impl Dispatcher {
    /// Dispatcher with default policy, selection, and timeouts.
    pub fn new(classifier: Option<Arc<dyn OutputClassifier>>, engine: SimilarityEngine) -> Self {
        Self {
            classifier,
            policy: ActivationPolicy::default(),
            engine: Arc::new(engine),
            selector: RetrievalSelector::default(),
            loader: DocumentLoader::default(),
            scoring_timeout: Duration::from_millis(DEFAULT_SCORING_TIMEOUT_MS),
        }
    }

    pub fn from_config(
        config: &Config,
        classifier: Option<Arc<dyn OutputClassifier>>,
        engine: SimilarityEngine,
    ) -> Self {
        Self::new(classifier, engine)
            .with_policy(config.activation_policy())
            .with_selector(config.selector())
            .with_loader(config.document_loader())
            .with_scoring_timeout(config.scoring_timeout)
    }

    pub fn with_policy(mut self, policy: ActivationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_selector(mut self, selector: RetrievalSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_loader(mut self, loader: DocumentLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_scoring_timeout(mut self, timeout: Duration) -> Self {
        self.scoring_timeout = timeout;
        self
    }

    /// `true` when no classifier is loaded.
    pub fn is_bypassed(&self) -> bool {
        self.classifier.is_none()
    }

    /// Handles one raw input line. Every failure becomes an error response.
    pub async fn handle_line(&self, line: &str) -> Response {
        let span = info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            task = tracing::field::Empty,
        );

        async move {
            let result = match Request::parse(line) {
                Ok(request) => {
                    tracing::Span::current().record("task", request.task());
                    self.dispatch(request).await
                }
                Err(e) => Err(e),
            };

            match result {
                Ok(response) => {
                    debug!("Request complete");
                    response
                }
                Err(e) => {
                    warn!(error = %e, "Request failed");
                    Response::from(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    pub async fn dispatch(&self, request: Request) -> Result<Response, WorkerError> {
        debug!(
            prompt = %prompt_fingerprint(request.prompt()),
            prompt_len = request.prompt().len(),
            "Dispatching request"
        );

        match request {
            Request::Classify { prompt } => self.classify(&prompt).map(Response::Classification),
            Request::Retrieve { prompt, inventory } => self
                .retrieve(&prompt, &inventory)
                .await
                .map(Response::Retrieval),
        }
    }

    /// Classification: classifier scores, then the activation policy.
    pub fn classify(&self, prompt: &str) -> Result<ClassificationResponse, WorkerError> {
        let Some(classifier) = &self.classifier else {
            return Ok(ClassificationResponse::new(
                prompt,
                &ActivationPolicy::bypass(),
                None,
            ));
        };

        let scores = classifier.score(prompt)?;
        let activation = self.policy.activate(&scores);

        debug!(
            outcome = %activation.outcome,
            primary = %activation.primary,
            "Classification complete"
        );

        Ok(ClassificationResponse::new(prompt, &activation, Some(scores)))
    }

    /// Retrieval: materialize, score off the async runtime, select.
    ///
    /// A scoring timeout abandons the blocking task without cancelling it; it runs
    /// to completion on the blocking pool and its result is dropped.
    pub async fn retrieve(
        &self,
        prompt: &str,
        inventory: &[InventoryItem],
    ) -> Result<RetrievalResponse, WorkerError> {
        if inventory.is_empty() {
            return Ok(RetrievalResponse::empty_inventory());
        }

        let documents = self.loader.materialize(inventory).await;
        let contents: Vec<String> = documents.iter().map(|doc| doc.content.clone()).collect();

        let engine = Arc::clone(&self.engine);
        let query = prompt.to_string();
        let scoring = tokio::task::spawn_blocking(move || {
            let corpus: Vec<&str> = contents.iter().map(String::as_str).collect();
            engine.score(&query, &corpus)
        });

        let scored = match tokio::time::timeout(self.scoring_timeout, scoring).await {
            Ok(Ok(scored)) => scored,
            Ok(Err(e)) => return Err(WorkerError::ScoringFailed(e.to_string())),
            Err(_) => return Err(WorkerError::ScoringTimedOut(self.scoring_timeout.as_millis())),
        };

        let selected = self.selector.select(&documents, &scored.scores);

        debug!(
            documents = documents.len(),
            selected = selected.len(),
            path = scored.path.as_str(),
            "Retrieval complete"
        );

        Ok(RetrievalResponse::new(
            selected,
            selection_note(
                documents.len(),
                self.selector.floor(),
                self.selector.max_selected(),
            ),
        ))
    }
}
