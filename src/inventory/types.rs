use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::DEFAULT_CATEGORY;

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// A `null` path behaves like a missing one.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One entry of a retrieval request's inventory.
pub struct InventoryItem {
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default)]
    pub description: String,

    /// Location of the item's content; may not resolve.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub path: String,
}

impl InventoryItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            description: description.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A materialized inventory item. Lives for one request.
pub struct Document {
    pub name: String,
    pub category: String,
    pub description: String,
    pub content: String,
}

impl Document {
    /// Builds a document from `item` with explicit `content`.
    pub fn from_item(item: &InventoryItem, content: String) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category.clone(),
            description: item.description.clone(),
            content,
        }
    }

    /// Builds a document whose content is the item's description.
    pub fn from_description(item: &InventoryItem) -> Self {
        Self::from_item(item, item.description.clone())
    }
}
