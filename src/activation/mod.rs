//! Label activation: raw per-label probabilities to an activation set.
//!
//! A label is active when its score reaches the policy threshold. If nothing
//! reaches it, the highest-scoring label is forced on, so every [`Activation`]
//! has at least one active label. The legacy primary type is the first active
//! label in [`OutputLabel::PRIORITY`](crate::labels::OutputLabel::PRIORITY).
//!
//! [`ActivationPolicy::bypass`] is the separate path used when no classifier
//! is loaded: only `text` is active and no scores exist.

pub mod policy;
pub mod types;


pub use policy::{ActivationPolicy, primary_type};
pub use types::{Activation, ActivationOutcome};
