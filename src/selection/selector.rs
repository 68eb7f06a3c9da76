use std::cmp::Ordering;

use tracing::debug;

use crate::constants::{DEFAULT_MAX_SELECTED, DEFAULT_RELEVANCE_FLOOR};
use crate::inventory::Document;

use super::types::SelectedMemory;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrievalSelector {
    floor: f64,
    max_selected: usize,
}

impl Default for RetrievalSelector {
    fn default() -> Self {
        Self::new(DEFAULT_RELEVANCE_FLOOR, DEFAULT_MAX_SELECTED)
    }
}

impl RetrievalSelector {
    pub fn new(floor: f64, max_selected: usize) -> Self {
        Self {
            floor,
            max_selected,
        }
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn max_selected(&self) -> usize {
        self.max_selected
    }

    /// Indices of the selected entries, best first.
    ///
    /// `scores[i]` belongs to item `i`. Scores at or below the floor (and NaN) are dropped.
    pub fn rank(&self, scores: &[f64]) -> Vec<usize> {
        let mut ranked: Vec<usize> = (0..scores.len())
            .filter(|&i| scores[i] > self.floor)
            .collect();

        ranked.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(Ordering::Equal)
        });

        ranked.truncate(self.max_selected);
        ranked
    }

    /// Selects from `documents` paired with `scores` in order.
    pub fn select(&self, documents: &[Document], scores: &[f64]) -> Vec<SelectedMemory> {
        if documents.len() != scores.len() {
            debug!(
                documents = documents.len(),
                scores = scores.len(),
                "Score count differs from document count, pairing the common prefix"
            );
        }
        let paired = documents.len().min(scores.len());

        let selected: Vec<SelectedMemory> = self
            .rank(&scores[..paired])
            .into_iter()
            .map(|i| SelectedMemory::new(&documents[i], scores[i]))
            .collect();

        debug!(
            candidates = paired,
            selected = selected.len(),
            floor = self.floor,
            cap = self.max_selected,
            "Retrieval selection complete"
        );

        selected
    }
}
