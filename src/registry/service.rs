use std::sync::Arc;

use crate::error::{BlobError, Result};
use crate::metadata::store::MetadataStore;
use crate::metadata::types::{StorageNode, now_ms};

pub struct NodeRegistry {
    store: Arc<dyn MetadataStore>,
}

impl NodeRegistry {
    pub fn new(store: Arc<dyn MetadataStore>) -> Self {
        Self { store }
    }

    /// Records a heartbeat from `address`.
    ///
    /// Idempotent: repeated calls keep a single entry and only move `last_seen` forward.
    pub fn register(&self, address: &str) -> Result<StorageNode> {
        let address = address.trim();
        if address.is_empty() {
            return Err(BlobError::Validation("Node address is required".to_string()));
        }

        let node = self
            .store
            .upsert_node(address, now_ms())
            .map_err(BlobError::Registry)?;

        tracing::debug!(
            "Node registered/updated: {} (last_seen={})",
            node.address,
            node.last_seen
        );
        Ok(node)
    }

    /// Addresses eligible for placement. Stale entries are included.
    pub fn list(&self) -> Result<Vec<String>> {
        Ok(self
            .nodes()?
            .into_iter()
            .map(|node| node.address)
            .collect())
    }

    pub fn nodes(&self) -> Result<Vec<StorageNode>> {
        self.store.list_nodes().map_err(BlobError::Registry)
    }
}
