use dashmap::DashMap;

use super::store::{MetadataStore, StoreError};
use super::types::{FileRecord, StorageNode};

/// Volatile backend. State is lost when the Controller exits.
#[derive(Default)]
pub struct MemoryStore {
    nodes: DashMap<String, StorageNode>,
    files: DashMap<String, FileRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataStore for MemoryStore {
    fn upsert_node(&self, address: &str, last_seen: u64) -> Result<StorageNode, StoreError> {
        // The entry guard holds the shard lock for the whole read-modify-write.
        let node = self
            .nodes
            .entry(address.to_string())
            .and_modify(|node| node.last_seen = last_seen)
            .or_insert_with(|| StorageNode {
                address: address.to_string(),
                last_seen,
            })
            .clone();
        Ok(node)
    }

    fn list_nodes(&self) -> Result<Vec<StorageNode>, StoreError> {
        let mut nodes: Vec<StorageNode> = self
            .nodes
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        nodes.sort_by(|a, b| a.address.cmp(&b.address));
        Ok(nodes)
    }

    fn put_file(&self, record: FileRecord) -> Result<(), StoreError> {
        self.files.insert(record.filename.clone(), record);
        Ok(())
    }

    fn get_file(&self, filename: &str) -> Result<Option<FileRecord>, StoreError> {
        Ok(self.files.get(filename).map(|entry| entry.value().clone()))
    }

    fn list_files(&self) -> Result<Vec<FileRecord>, StoreError> {
        let mut files: Vec<FileRecord> = self
            .files
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        files.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(files)
    }
}
