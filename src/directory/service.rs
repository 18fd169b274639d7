use std::sync::Arc;

use crate::error::{BlobError, Result};
use crate::metadata::store::MetadataStore;
use crate::metadata::types::FileRecord;

pub struct FileDirectory {
    store: Arc<dyn MetadataStore>,
}

impl FileDirectory {
    pub fn new(store: Arc<dyn MetadataStore>) -> Self {
        Self { store }
    }

    pub fn put(&self, filename: &str, address: &str) -> Result<()> {
        self.store
            .put_file(FileRecord {
                filename: filename.to_string(),
                address: address.to_string(),
            })
            .map_err(BlobError::Directory)
    }

    /// Owner address of `filename`.
    pub fn get(&self, filename: &str) -> Result<String> {
        match self.store.get_file(filename).map_err(BlobError::Directory)? {
            Some(record) => Ok(record.address),
            None => Err(BlobError::FileNotFound {
                filename: filename.to_string(),
            }),
        }
    }

    pub fn list(&self) -> Result<Vec<FileRecord>> {
        self.store.list_files().map_err(BlobError::Directory)
    }
}
