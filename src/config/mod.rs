//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `TRIAGE_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::activation::ActivationPolicy;
use crate::classifier::ClassifierConfig;
use crate::constants::{
    DEFAULT_ACTIVATION_THRESHOLD, DEFAULT_DOCUMENT_TIMEOUT_MS, DEFAULT_MAX_FEATURES,
    DEFAULT_MAX_SELECTED, DEFAULT_RELEVANCE_FLOOR, DEFAULT_SCORING_TIMEOUT_MS,
};
use crate::inventory::DocumentLoader;
use crate::selection::RetrievalSelector;
use crate::similarity::{BackendPreference, DEFAULT_NGRAM_RANGE, SimilarityConfig};

/// Worker configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `TRIAGE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Classifier artifact directory. Unset means bypass mode.
    pub model_path: Option<PathBuf>,

    /// Inclusive per-label activation threshold. Default: `0.38`.
    pub activation_threshold: f32,

    /// Exclusive retrieval relevance floor. Default: `0.02`.
    pub relevance_floor: f64,

    /// Maximum documents per retrieval response. Default: `8`.
    pub max_selected: usize,

    /// Vocabulary cap of the accelerated similarity path. Default: `3000`.
    pub max_features: usize,

    pub similarity_backend: BackendPreference,

    pub document_timeout: Duration,

    pub scoring_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: None,
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            relevance_floor: DEFAULT_RELEVANCE_FLOOR,
            max_selected: DEFAULT_MAX_SELECTED,
            max_features: DEFAULT_MAX_FEATURES,
            similarity_backend: BackendPreference::default(),
            document_timeout: Duration::from_millis(DEFAULT_DOCUMENT_TIMEOUT_MS),
            scoring_timeout: Duration::from_millis(DEFAULT_SCORING_TIMEOUT_MS),
        }
    }
}

impl Config {
    const ENV_MODEL_PATH: &'static str = "TRIAGE_MODEL_PATH";
    const ENV_ACTIVATION_THRESHOLD: &'static str = "TRIAGE_ACTIVATION_THRESHOLD";
    const ENV_RELEVANCE_FLOOR: &'static str = "TRIAGE_RELEVANCE_FLOOR";
    const ENV_MAX_SELECTED: &'static str = "TRIAGE_MAX_SELECTED";
    const ENV_MAX_FEATURES: &'static str = "TRIAGE_MAX_FEATURES";
    const ENV_SIMILARITY_BACKEND: &'static str = "TRIAGE_SIMILARITY_BACKEND";
    const ENV_DOCUMENT_TIMEOUT_MS: &'static str = "TRIAGE_DOCUMENT_TIMEOUT_MS";
    const ENV_SCORING_TIMEOUT_MS: &'static str = "TRIAGE_SCORING_TIMEOUT_MS";

    /// Names of every environment variable read by [`Config::from_env`].
    pub const ENV_VARS: [&'static str; 8] = [
        Self::ENV_MODEL_PATH,
        Self::ENV_ACTIVATION_THRESHOLD,
        Self::ENV_RELEVANCE_FLOOR,
        Self::ENV_MAX_SELECTED,
        Self::ENV_MAX_FEATURES,
        Self::ENV_SIMILARITY_BACKEND,
        Self::ENV_DOCUMENT_TIMEOUT_MS,
        Self::ENV_SCORING_TIMEOUT_MS,
    ];

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let activation_threshold =
            Self::parse_float_from_env(Self::ENV_ACTIVATION_THRESHOLD, defaults.activation_threshold)?;
        let relevance_floor =
            Self::parse_float_from_env(Self::ENV_RELEVANCE_FLOOR, defaults.relevance_floor)?;
        let max_selected = Self::parse_int_from_env(Self::ENV_MAX_SELECTED, defaults.max_selected)?;
        let max_features = Self::parse_int_from_env(Self::ENV_MAX_FEATURES, defaults.max_features)?;
        let similarity_backend = Self::parse_backend_from_env(defaults.similarity_backend)?;
        let document_timeout = Self::parse_millis_from_env(
            Self::ENV_DOCUMENT_TIMEOUT_MS,
            defaults.document_timeout,
        )?;
        let scoring_timeout =
            Self::parse_millis_from_env(Self::ENV_SCORING_TIMEOUT_MS, defaults.scoring_timeout)?;

        Ok(Self {
            model_path,
            activation_threshold,
            relevance_floor,
            max_selected,
            max_features,
            similarity_backend,
            document_timeout,
            scoring_timeout,
        })
    }

    /// Checks ranges. A missing model directory is not an error here; it means bypass mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.activation_threshold) {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_ACTIVATION_THRESHOLD,
                value: self.activation_threshold.to_string(),
                expected: "between 0.0 and 1.0",
            });
        }

        if !(0.0..1.0).contains(&self.relevance_floor) {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_RELEVANCE_FLOOR,
                value: self.relevance_floor.to_string(),
                expected: "at least 0.0 and below 1.0",
            });
        }

        if self.max_selected == 0 {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_MAX_SELECTED,
                value: self.max_selected.to_string(),
                expected: "at least 1",
            });
        }

        if self.max_features == 0 {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_MAX_FEATURES,
                value: self.max_features.to_string(),
                expected: "at least 1",
            });
        }

        for (name, timeout) in [
            (Self::ENV_DOCUMENT_TIMEOUT_MS, self.document_timeout),
            (Self::ENV_SCORING_TIMEOUT_MS, self.scoring_timeout),
        ] {
            if timeout.is_zero() {
                return Err(ConfigError::OutOfRange {
                    name,
                    value: timeout.as_millis().to_string(),
                    expected: "at least 1 ms",
                });
            }
        }

        Ok(())
    }

    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            model_path: self.model_path.clone(),
        }
    }

    pub fn similarity_config(&self) -> SimilarityConfig {
        SimilarityConfig {
            max_features: self.max_features,
            ngram_range: DEFAULT_NGRAM_RANGE,
            backend: self.similarity_backend,
        }
    }

    pub fn activation_policy(&self) -> ActivationPolicy {
        ActivationPolicy::new(self.activation_threshold)
    }

    pub fn selector(&self) -> RetrievalSelector {
        RetrievalSelector::new(self.relevance_floor, self.max_selected)
    }

    pub fn document_loader(&self) -> DocumentLoader {
        DocumentLoader::new(self.document_timeout)
    }

    fn read_trimmed(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::read_trimmed(var_name).map(PathBuf::from)
    }

    fn parse_int_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr<Err = std::num::ParseIntError>,
    {
        match Self::read_trimmed(var_name) {
            Some(value) => value.parse().map_err(|e| ConfigError::IntParseError {
                name: var_name,
                value,
                source: e,
            }),
            None => Ok(default),
        }
    }

    fn parse_float_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr<Err = std::num::ParseFloatError>,
    {
        match Self::read_trimmed(var_name) {
            Some(value) => value.parse().map_err(|e| ConfigError::FloatParseError {
                name: var_name,
                value,
                source: e,
            }),
            None => Ok(default),
        }
    }

    fn parse_millis_from_env(
        var_name: &'static str,
        default: Duration,
    ) -> Result<Duration, ConfigError> {
        let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
        Self::parse_int_from_env(var_name, default_ms).map(Duration::from_millis)
    }

    fn parse_backend_from_env(default: BackendPreference) -> Result<BackendPreference, ConfigError> {
        match Self::read_trimmed(Self::ENV_SIMILARITY_BACKEND) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidBackend {
                name: Self::ENV_SIMILARITY_BACKEND,
                value,
            }),
            None => Ok(default),
        }
    }
}
