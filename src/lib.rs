//! Triage library crate (used by the worker binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Classification
//! - [`OutputLabel`], [`LabelScores`], [`LabelFlags`] - The fixed label set and vectors over it
//! - [`ActivationPolicy`], [`Activation`] - Threshold-then-argmax activation
//! - [`OutputClassifier`], [`LinearClassifier`], [`load_classifier`] - Classifier capability
//!
//! ## Retrieval
//! - [`SimilarityEngine`], [`AcceleratedTfidf`], [`PureTfidf`] - TF-IDF cosine similarity
//! - [`RetrievalSelector`], [`SelectedMemory`] - Floor, sort, and cap
//! - [`InventoryItem`], [`Document`], [`DocumentLoader`] - Inventory materialization
//!
//! ## Worker
//! - [`Dispatcher`], [`serve`] - Request routing and the line loop
//! - [`Config`], [`ConfigError`] - Environment-backed configuration
//!
//! ## Test/Mock Support
//! [`MockClassifier`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod activation;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod device;
pub mod hashing;
pub mod inventory;
pub mod labels;
pub mod selection;
pub mod similarity;
pub mod worker;

pub use activation::{Activation, ActivationOutcome, ActivationPolicy, primary_type};
#[cfg(any(test, feature = "mock"))]
pub use classifier::MockClassifier;
pub use classifier::{
    ClassifierConfig, ClassifierError, FeatureVector, LinearClassifier, OutputClassifier,
    TfidfVectorizer, load_classifier,
};
pub use config::{Config, ConfigError};
pub use device::select_device;
pub use hashing::prompt_fingerprint;
pub use inventory::{Document, DocumentLoader, InventoryItem};
pub use labels::{LABEL_COUNT, LabelFlags, LabelScores, OutputLabel};
pub use selection::{RetrievalSelector, SelectedMemory};
pub use similarity::{
    AcceleratedTfidf, BackendPreference, PureTfidf, ScoredCorpus, ScoringPath, SimilarityBackend,
    SimilarityConfig, SimilarityEngine, SimilarityError,
};
pub use worker::{Dispatcher, Request, Response, ServeStats, WorkerError, serve};
