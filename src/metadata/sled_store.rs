use std::path::Path;

use sled::{Db, Tree};

use super::store::{MetadataStore, StoreError};
use super::types::{FileRecord, StorageNode};

const NODES_TREE: &str = "nodes";
const FILES_TREE: &str = "files";

/// Persistent backend on an embedded sled database.
///
/// Nodes and files live in separate trees keyed by address and filename. Values are
/// bincode-encoded.
pub struct SledStore {
    db: Db,
    nodes: Tree,
    files: Tree,
}

impl SledStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let nodes = db.open_tree(NODES_TREE)?;
        let files = db.open_tree(FILES_TREE)?;
        Ok(Self { db, nodes, files })
    }
}

impl MetadataStore for SledStore {
    fn upsert_node(&self, address: &str, last_seen: u64) -> Result<StorageNode, StoreError> {
        // A StorageNode is fully described by (address, last_seen), so a plain insert
        // is the upsert.
        let node = StorageNode {
            address: address.to_string(),
            last_seen,
        };
        self.nodes
            .insert(address.as_bytes(), bincode::serialize(&node)?)?;
        Ok(node)
    }

    fn list_nodes(&self) -> Result<Vec<StorageNode>, StoreError> {
        // sled iterates in key order, which is address order.
        self.nodes
            .iter()
            .values()
            .map(|value| Ok(bincode::deserialize::<StorageNode>(&value?)?))
            .collect()
    }

    fn put_file(&self, record: FileRecord) -> Result<(), StoreError> {
        let encoded = bincode::serialize(&record)?;
        self.files.insert(record.filename.as_bytes(), encoded)?;
        Ok(())
    }

    fn get_file(&self, filename: &str) -> Result<Option<FileRecord>, StoreError> {
        match self.files.get(filename.as_bytes())? {
            Some(value) => Ok(Some(bincode::deserialize(&value)?)),
            None => Ok(None),
        }
    }

    fn list_files(&self) -> Result<Vec<FileRecord>, StoreError> {
        self.files
            .iter()
            .values()
            .map(|value| Ok(bincode::deserialize::<FileRecord>(&value?)?))
            .collect()
    }

    fn flush(&self) -> Result<(), StoreError> {
        let bytes = self.db.flush()?;
        tracing::debug!("Flushed {} bytes of metadata to disk", bytes);
        Ok(())
    }
}
