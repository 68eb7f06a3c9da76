use tracing::debug;

use crate::constants::DEFAULT_ACTIVATION_THRESHOLD;
use crate::labels::{LabelFlags, LabelScores, OutputLabel};

use super::types::{Activation, ActivationOutcome};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationPolicy {
    threshold: f32,
}

impl Default for ActivationPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ACTIVATION_THRESHOLD,
        }
    }
}

impl ActivationPolicy {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_active(&self, score: f32) -> bool {
        score >= self.threshold
    }

    /// Applies threshold-then-argmax activation to a score vector.
    pub fn activate(&self, scores: &LabelScores) -> Activation {
        let mut labels = LabelFlags::default();
        for (label, score) in scores.iter() {
            labels.set(label, self.is_active(score));
        }

        let outcome = if labels.any_active() {
            ActivationOutcome::Thresholded {
                active: labels.active_count(),
            }
        } else {
            let label = scores.argmax();
            labels.set(label, true);
            debug!(
                label = %label,
                score = scores.get(label),
                threshold = self.threshold,
                "No label met threshold, forcing argmax"
            );
            ActivationOutcome::Fallback {
                label,
                score: scores.get(label),
            }
        };

        Activation {
            labels,
            primary: primary_type(&labels),
            outcome,
        }
    }

    /// Fixed activation used when no classifier is available.
    pub fn bypass() -> Activation {
        Activation {
            labels: LabelFlags::only(OutputLabel::Text),
            primary: OutputLabel::Text,
            outcome: ActivationOutcome::Bypassed,
        }
    }
}

/// First active label in priority order, `text` if none is active.
pub fn primary_type(labels: &LabelFlags) -> OutputLabel {
    OutputLabel::PRIORITY
        .into_iter()
        .find(|label| labels.is_active(*label))
        .unwrap_or(OutputLabel::Text)
}
