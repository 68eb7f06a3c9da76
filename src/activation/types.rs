use crate::labels::{LabelFlags, OutputLabel};

#[derive(Debug, Clone, Copy, PartialEq)]
/// How an activation set was reached.
pub enum ActivationOutcome {
    /// At least one label met the threshold.
    Thresholded {
        /// Number of labels at or above the threshold.
        active: usize,
    },
    /// Nothing met the threshold; the argmax label was forced on.
    Fallback {
        /// The forced label.
        label: OutputLabel,
        /// Its score.
        score: f32,
    },
    /// No classifier was available; the fixed default was used.
    Bypassed,
}

impl ActivationOutcome {
    /// Returns a short debug string.
    pub fn debug_status(&self) -> &'static str {
        match self {
            ActivationOutcome::Thresholded { .. } => "THRESHOLDED",
            ActivationOutcome::Fallback { .. } => "FALLBACK",
            ActivationOutcome::Bypassed => "BYPASSED",
        }
    }
}

impl std::fmt::Display for ActivationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivationOutcome::Thresholded { active } => {
                write!(f, "THRESHOLDED ({} active)", active)
            }
            ActivationOutcome::Fallback { label, score } => {
                write!(f, "FALLBACK ({}: {:.4})", label, score)
            }
            ActivationOutcome::Bypassed => write!(f, "BYPASSED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Result of applying the activation policy.
pub struct Activation {
    /// Active flag per label.
    pub labels: LabelFlags,
    /// Legacy single output type.
    pub primary: OutputLabel,
    /// How the flags were derived.
    pub outcome: ActivationOutcome,
}

impl Activation {
    /// Returns `true` if the activation came from the bypass path.
    pub fn is_bypassed(&self) -> bool {
        matches!(self.outcome, ActivationOutcome::Bypassed)
    }
}
