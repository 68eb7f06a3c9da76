//! Retrieval selection over scored documents.
//!
//! Keeps documents scoring strictly above the relevance floor, orders them by
//! descending score (stable for ties), and caps the result.

pub mod selector;
pub mod types;

#[cfg(test)]
mod tests;

pub use selector::RetrievalSelector;
pub use types::SelectedMemory;
