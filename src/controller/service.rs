use std::sync::Arc;

use super::client::NodeClient;
use crate::directory::service::FileDirectory;
use crate::error::{BlobError, Result};
use crate::metadata::store::MetadataStore;
use crate::metadata::types::{FileRecord, StorageNode};
use crate::node::blobs::{ByteStream, RetrievedBlob, validate_filename};
use crate::placement::policy::Placement;
use crate::registry::service::NodeRegistry;

/// The control plane: membership, file ownership and routing of blob traffic.
///
/// All collaborators are injected, so the same type runs in production (sled or
/// memory store, random placement, HTTP node client) and in tests (stubs).
pub struct Controller {
    registry: NodeRegistry,
    directory: FileDirectory,
    placement: Arc<dyn Placement>,
    nodes: Arc<dyn NodeClient>,
}

impl Controller {
    pub fn new(
        store: Arc<dyn MetadataStore>,
        placement: Arc<dyn Placement>,
        nodes: Arc<dyn NodeClient>,
    ) -> Self {
        Self {
            registry: NodeRegistry::new(store.clone()),
            directory: FileDirectory::new(store),
            placement,
            nodes,
        }
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn directory(&self) -> &FileDirectory {
        &self.directory
    }

    pub fn register(&self, address: &str) -> Result<StorageNode> {
        let node = self.registry.register(address)?;
        tracing::info!("Node registered/updated: {}", node.address);
        Ok(node)
    }

    /// Places `filename` on one Node, streams `body` to it, then records the owner.
    ///
    /// The Directory only changes after the Node has acknowledged the write. The two
    /// steps are not atomic: if recording fails the blob stays on the Node unreferenced.
    pub async fn upload(&self, filename: &str, body: ByteStream) -> Result<String> {
        validate_filename(filename)?;

        let candidates = self.registry.list()?;
        if candidates.is_empty() {
            tracing::warn!("Upload of {} rejected: no storage nodes registered", filename);
            return Err(BlobError::NoNodesAvailable);
        }

        let target = self
            .placement
            .choose(&candidates)
            .ok_or(BlobError::NoNodesAvailable)?;
        tracing::debug!(
            "Placing {} on {} ({} candidates)",
            filename,
            target,
            candidates.len()
        );

        self.nodes.store(&target, filename, body).await?;

        if let Err(e) = self.directory.put(filename, &target) {
            tracing::error!(
                "Stored {} on {} but failed to record it, blob is unreferenced: {}",
                filename,
                target,
                e
            );
            return Err(e);
        }

        tracing::info!("File '{}' stored on node {}", filename, target);
        Ok(target)
    }

    /// Streams `filename` back from its owning Node.
    ///
    /// Unknown filenames fail before any Node is contacted. There is no fallback:
    /// each file has exactly one copy.
    pub async fn download(&self, filename: &str) -> Result<RetrievedBlob> {
        let owner = self.directory.get(filename)?;
        tracing::debug!("Fetching {} from {}", filename, owner);
        self.nodes.retrieve(&owner, filename).await
    }

    pub fn nodes(&self) -> Result<Vec<StorageNode>> {
        self.registry.nodes()
    }

    pub fn files(&self) -> Result<Vec<FileRecord>> {
        self.directory.list()
    }
}
