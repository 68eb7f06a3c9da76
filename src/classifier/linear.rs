use std::collections::HashSet;
use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use serde::Deserialize;
use tracing::debug;

use crate::device::select_device;
use crate::labels::{LabelScores, OutputLabel};

use super::OutputClassifier;
use super::error::ClassifierError;
use super::types::FeatureVector;
use super::vectorizer::TfidfVectorizer;

pub const CONFIG_FILE: &str = "config.json";
pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const WEIGHTS_FILE: &str = "model.safetensors";

#[derive(Debug, Deserialize)]
struct ArtifactConfig {
    labels: Vec<String>,
}

/// TF-IDF features followed by an independent logistic head per label.
pub struct LinearClassifier {
    device: Device,
    labels: Vec<OutputLabel>,
    vectorizer: TfidfVectorizer,
    head: Linear,
}

impl std::fmt::Debug for LinearClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearClassifier")
            .field("device", &format!("{:?}", self.device))
            .field("labels", &self.labels)
            .field("features", &self.vectorizer.dim())
            .finish()
    }
}

impl LinearClassifier {
    pub fn load(model_dir: &Path) -> Result<Self, ClassifierError> {
        Self::load_on(model_dir, select_device())
    }

    pub fn load_on(model_dir: &Path, device: Device) -> Result<Self, ClassifierError> {
        if !model_dir.is_dir() {
            return Err(ClassifierError::ModelNotFound {
                path: model_dir.to_path_buf(),
            });
        }

        let config_path = model_dir.join(CONFIG_FILE);
        let vectorizer_path = model_dir.join(VECTORIZER_FILE);
        let weights_path = model_dir.join(WEIGHTS_FILE);
        for required in [&config_path, &vectorizer_path, &weights_path] {
            if !required.exists() {
                return Err(ClassifierError::ModelLoadFailed {
                    reason: format!("Missing {}", required.display()),
                });
            }
        }

        let config: ArtifactConfig = serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;
        let labels = parse_labels(&config.labels)?;
        let vectorizer = TfidfVectorizer::load(&vectorizer_path)?;

        debug!(
            labels = labels.len(),
            features = vectorizer.dim(),
            ?device,
            "Loading classifier weights"
        );

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&weights_path], DType::F32, &device)
                .map_err(|e| ClassifierError::ModelLoadFailed {
                    reason: format!("Failed to map weights: {}", e),
                })?
        };
        let head = candle_nn::linear(vectorizer.dim(), labels.len(), vb.pp("classifier")).map_err(
            |e| ClassifierError::ModelLoadFailed {
                reason: format!("Failed to load classifier head: {}", e),
            },
        )?;

        Ok(Self {
            device,
            labels,
            vectorizer,
            head,
        })
    }

    /// Labels in weight-row order.
    pub fn labels(&self) -> &[OutputLabel] {
        &self.labels
    }

    pub fn feature_dim(&self) -> usize {
        self.vectorizer.dim()
    }
}

impl OutputClassifier for LinearClassifier {
    fn transform(&self, prompt: &str) -> Result<FeatureVector, ClassifierError> {
        Ok(self.vectorizer.transform(prompt))
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<LabelScores, ClassifierError> {
        if features.dim() != self.vectorizer.dim() {
            return Err(ClassifierError::InferenceFailed {
                reason: format!(
                    "expected {} features, got {}",
                    self.vectorizer.dim(),
                    features.dim()
                ),
            });
        }

        let input = Tensor::from_vec(features.to_dense(), (1, features.dim()), &self.device)?;
        let logits = self.head.forward(&input)?;
        let probabilities = logits
            .neg()?
            .exp()?
            .affine(1.0, 1.0)?
            .recip()?
            .flatten_all()?
            .to_vec1::<f32>()?;

        if probabilities.len() != self.labels.len() {
            return Err(ClassifierError::InferenceFailed {
                reason: format!(
                    "expected {} probabilities, got {}",
                    self.labels.len(),
                    probabilities.len()
                ),
            });
        }

        Ok(LabelScores::from_pairs(
            self.labels.iter().copied().zip(probabilities),
        ))
    }
}

fn parse_labels(names: &[String]) -> Result<Vec<OutputLabel>, ClassifierError> {
    if names.is_empty() {
        return Err(ClassifierError::InvalidArtifact {
            reason: "label list is empty".to_string(),
        });
    }

    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| {
            let label: OutputLabel = name
                .parse()
                .map_err(|reason| ClassifierError::InvalidArtifact { reason })?;
            if !seen.insert(label) {
                return Err(ClassifierError::InvalidArtifact {
                    reason: format!("duplicate label: {}", name),
                });
            }
            Ok(label)
        })
        .collect()
}
