use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::constants::DEFAULT_DOCUMENT_TIMEOUT_MS;

use super::types::{Document, InventoryItem};

#[derive(Debug, Clone, Copy)]
/// Reads inventory content from the filesystem, one item at a time.
pub struct DocumentLoader {
    timeout: Duration,
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DOCUMENT_TIMEOUT_MS))
    }
}

impl DocumentLoader {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Materializes every item, preserving order. Never fails.
    pub async fn materialize(&self, items: &[InventoryItem]) -> Vec<Document> {
        let mut documents = Vec::with_capacity(items.len());
        for item in items {
            documents.push(self.materialize_one(item).await);
        }
        documents
    }

    /// Reads `item.path` as lossy UTF-8, or falls back to the description.
    pub async fn materialize_one(&self, item: &InventoryItem) -> Document {
        if item.path.is_empty() {
            return Document::from_description(item);
        }

        match self.read_text(Path::new(&item.path)).await {
            Ok(content) => Document::from_item(item, content),
            Err(reason) => {
                debug!(
                    name = %item.name,
                    path = %item.path,
                    reason = %reason,
                    "Document unreadable, using description"
                );
                Document::from_description(item)
            }
        }
    }

    async fn read_text(&self, path: &Path) -> Result<String, String> {
        match tokio::time::timeout(self.timeout, tokio::fs::read(path)).await {
            Ok(Ok(bytes)) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("read timed out after {}ms", self.timeout.as_millis())),
        }
    }
}
