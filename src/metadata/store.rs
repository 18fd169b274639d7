use std::sync::Arc;

use super::memory::MemoryStore;
use super::sled_store::SledStore;
use super::types::{FileRecord, StorageNode};

const MEMORY_SCHEME: &str = "memory://";
const SLED_SCHEME: &str = "sled://";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sled::Error),

    #[error("encoding error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("invalid store connection string: {0}")]
    InvalidConnection(String),
}

/// Storage access for Controller state.
///
/// Implementations must make each method atomic for the key it touches; callers rely
/// on that and take no locks of their own.
pub trait MetadataStore: Send + Sync {
    /// Creates the entry if absent, otherwise overwrites `last_seen`.
    fn upsert_node(&self, address: &str, last_seen: u64) -> Result<StorageNode, StoreError>;

    /// All known nodes, ordered by address.
    fn list_nodes(&self) -> Result<Vec<StorageNode>, StoreError>;

    /// Unconditional overwrite of any previous record for the same filename.
    fn put_file(&self, record: FileRecord) -> Result<(), StoreError>;

    fn get_file(&self, filename: &str) -> Result<Option<FileRecord>, StoreError>;

    /// All records, ordered by filename.
    fn list_files(&self) -> Result<Vec<FileRecord>, StoreError>;

    /// Persists buffered writes. A no-op for backends that do not buffer.
    fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Opens the backend named by a connection string.
///
/// Accepted forms: `memory://` (or `memory`) and `sled://<path>`.
pub fn open_store(uri: &str) -> Result<Arc<dyn MetadataStore>, StoreError> {
    let uri = uri.trim();

    if uri == "memory" || uri == MEMORY_SCHEME {
        tracing::info!("Using in-memory metadata store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    if let Some(path) = uri.strip_prefix(SLED_SCHEME) {
        if path.is_empty() {
            return Err(StoreError::InvalidConnection(format!(
                "{} (missing database path)",
                uri
            )));
        }
        tracing::info!("Opening sled metadata store at {}", path);
        return Ok(Arc::new(SledStore::open(path)?));
    }

    Err(StoreError::InvalidConnection(uri.to_string()))
}
