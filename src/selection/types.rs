use serde::Serialize;

use crate::inventory::Document;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One selected document as reported to the caller.
pub struct SelectedMemory {
    pub name: String,
    pub category: String,
    /// Human-readable justification, e.g. `similarity: 0.42`.
    pub reason: String,
}

impl SelectedMemory {
    pub fn new(document: &Document, score: f64) -> Self {
        Self {
            name: document.name.clone(),
            category: document.category.clone(),
            reason: format_reason(score),
        }
    }
}

/// `similarity: {score:.2}`
pub fn format_reason(score: f64) -> String {
    format!("similarity: {:.2}", score)
}
