use std::sync::atomic::{AtomicBool, Ordering};

use super::memory::MemoryStore;
use super::store::{MetadataStore, StoreError};
use super::types::{FileRecord, StorageNode};

/// `MemoryStore` whose writes can be switched to fail, per table.
#[derive(Default)]
pub(crate) struct FaultyStore {
    inner: MemoryStore,
    fail_nodes: AtomicBool,
    fail_files: AtomicBool,
}

impl FaultyStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_node_writes(&self) {
        self.fail_nodes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_file_writes(&self) {
        self.fail_files.store(true, Ordering::SeqCst);
    }

    fn fault(table: &str) -> StoreError {
        StoreError::InvalidConnection(format!("{} table unavailable", table))
    }
}

impl MetadataStore for FaultyStore {
    fn upsert_node(&self, address: &str, last_seen: u64) -> Result<StorageNode, StoreError> {
        if self.fail_nodes.load(Ordering::SeqCst) {
            return Err(Self::fault("nodes"));
        }
        self.inner.upsert_node(address, last_seen)
    }

    fn list_nodes(&self) -> Result<Vec<StorageNode>, StoreError> {
        self.inner.list_nodes()
    }

    fn put_file(&self, record: FileRecord) -> Result<(), StoreError> {
        if self.fail_files.load(Ordering::SeqCst) {
            return Err(Self::fault("files"));
        }
        self.inner.put_file(record)
    }

    fn get_file(&self, filename: &str) -> Result<Option<FileRecord>, StoreError> {
        self.inner.get_file(filename)
    }

    fn list_files(&self) -> Result<Vec<FileRecord>, StoreError> {
        self.inner.list_files()
    }
}
