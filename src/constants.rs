//! Cross-cutting, shared constants.
//!
//! Runtime-tunable values (thresholds, caps, timeouts) only provide defaults here;
//! the effective values come from [`Config`](crate::config::Config).

/// Default activation threshold for a single output label (inclusive).
pub const DEFAULT_ACTIVATION_THRESHOLD: f32 = 0.38;

/// Default relevance floor for retrieval (exclusive).
pub const DEFAULT_RELEVANCE_FLOOR: f64 = 0.02;

/// Default maximum number of documents returned by a retrieval request.
pub const DEFAULT_MAX_SELECTED: usize = 8;

/// Default vocabulary cap for the accelerated similarity path.
pub const DEFAULT_MAX_FEATURES: usize = 3000;

/// Default per-document materialization timeout.
pub const DEFAULT_DOCUMENT_TIMEOUT_MS: u64 = 5_000;

/// Default similarity scoring timeout for one request.
pub const DEFAULT_SCORING_TIMEOUT_MS: u64 = 10_000;

/// Number of prompt characters echoed back in classification responses.
pub const PROMPT_ECHO_CHARS: usize = 500;

/// Decimal places kept for echoed label scores.
pub const SCORE_DECIMALS: i32 = 3;

/// Category assigned to inventory items that do not declare one.
pub const DEFAULT_CATEGORY: &str = "knowledge";

/// Note returned when a retrieval request carries no inventory.
pub const EMPTY_INVENTORY_NOTE: &str = "No memory files in inventory";

/// Builds the retrieval summary note.
pub fn selection_note(corpus_size: usize, floor: f64, cap: usize) -> String {
    format!(
        "Selected by TF-IDF cosine similarity from {corpus_size} memory files (threshold {floor}, top {cap})"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_note_formats_defaults() {
        assert_eq!(
            selection_note(3, DEFAULT_RELEVANCE_FLOOR, DEFAULT_MAX_SELECTED),
            "Selected by TF-IDF cosine similarity from 3 memory files (threshold 0.02, top 8)"
        );
    }
}
