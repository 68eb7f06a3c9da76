use crate::constants::DEFAULT_MAX_FEATURES;

/// Word n-gram range of the accelerated backend.
pub const DEFAULT_NGRAM_RANGE: (usize, usize) = (1, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Which backend the engine should try first.
pub enum BackendPreference {
    #[default]
    /// Accelerated backend, degrading to pure on failure.
    Auto,
    /// Pure backend only.
    Pure,
}

impl std::str::FromStr for BackendPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "accelerated" => Ok(Self::Auto),
            "pure" | "fallback" => Ok(Self::Pure),
            _ => Err(format!("Unknown similarity backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimilarityConfig {
    /// Vocabulary cap of the accelerated backend.
    pub max_features: usize,

    pub ngram_range: (usize, usize),

    pub backend: BackendPreference,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            ngram_range: DEFAULT_NGRAM_RANGE,
            backend: BackendPreference::default(),
        }
    }
}

impl SimilarityConfig {
    pub fn pure() -> Self {
        Self {
            backend: BackendPreference::Pure,
            ..Self::default()
        }
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_features == 0 {
            return Err("max_features must be at least 1".to_string());
        }

        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!(
                "invalid ngram_range ({}, {}): need 1 <= min <= max",
                min_n, max_n
            ));
        }

        Ok(())
    }
}
