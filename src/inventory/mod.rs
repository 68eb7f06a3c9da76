//! Caller-supplied inventory items and the per-request documents built from them.
//!
//! An item's `path` is advisory. [`DocumentLoader`] tries to read it as text and
//! substitutes the item's description whenever the read fails or times out.

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

pub use loader::DocumentLoader;
pub use types::{Document, InventoryItem};
