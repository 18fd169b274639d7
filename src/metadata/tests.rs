//! Metadata Store Tests
//!
//! Both backends are run through the same checks so they stay interchangeable.
//!
//! ## Test Scopes
//! - **Nodes**: upsert semantics and ordering of the candidate list.
//! - **Files**: unconditional overwrite and lookup of missing keys.
//! - **Connection strings**: backend selection and rejection of unknown schemes.
//! - **Persistence**: the sled backend keeps its state across a reopen.

#[cfg(test)]
mod tests {
    use crate::metadata::memory::MemoryStore;
    use crate::metadata::sled_store::SledStore;
    use crate::metadata::store::{MetadataStore, StoreError, open_store};
    use crate::metadata::types::FileRecord;

    fn record(filename: &str, address: &str) -> FileRecord {
        FileRecord {
            filename: filename.to_string(),
            address: address.to_string(),
        }
    }

    fn check_node_upsert(store: &dyn MetadataStore) {
        let first = store.upsert_node("10.0.0.1:3000", 100).unwrap();
        assert_eq!(first.last_seen, 100);

        let second = store.upsert_node("10.0.0.1:3000", 250).unwrap();
        assert_eq!(second.last_seen, 250);

        let nodes = store.list_nodes().unwrap();
        assert_eq!(nodes.len(), 1, "Same address must not create a second entry");
        assert_eq!(nodes[0].last_seen, 250);
    }

    fn check_node_ordering(store: &dyn MetadataStore) {
        store.upsert_node("node-c", 1).unwrap();
        store.upsert_node("node-a", 1).unwrap();
        store.upsert_node("node-b", 1).unwrap();

        let addresses: Vec<String> = store
            .list_nodes()
            .unwrap()
            .into_iter()
            .map(|node| node.address)
            .collect();
        assert_eq!(addresses, vec!["node-a", "node-b", "node-c"]);
    }

    fn check_file_overwrite(store: &dyn MetadataStore) {
        assert!(store.get_file("report.pdf").unwrap().is_none());

        store.put_file(record("report.pdf", "node-a")).unwrap();
        store.put_file(record("report.pdf", "node-b")).unwrap();
        store.put_file(record("notes.txt", "node-a")).unwrap();

        let found = store.get_file("report.pdf").unwrap().unwrap();
        assert_eq!(found.address, "node-b");

        let files = store.list_files().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].filename, "notes.txt");
        assert_eq!(files[1].filename, "report.pdf");
    }

    // ============================================================
    // MEMORY STORE
    // ============================================================

    #[test]
    fn test_memory_node_upsert() {
        check_node_upsert(&MemoryStore::new());
    }

    #[test]
    fn test_memory_node_ordering() {
        check_node_ordering(&MemoryStore::new());
    }

    #[test]
    fn test_memory_file_overwrite() {
        check_file_overwrite(&MemoryStore::new());
    }

    // ============================================================
    // SLED STORE
    // ============================================================

    #[test]
    fn test_sled_node_upsert() {
        let dir = tempfile::tempdir().unwrap();
        check_node_upsert(&SledStore::open(dir.path()).unwrap());
    }

    #[test]
    fn test_sled_node_ordering() {
        let dir = tempfile::tempdir().unwrap();
        check_node_ordering(&SledStore::open(dir.path()).unwrap());
    }

    #[test]
    fn test_sled_file_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        check_file_overwrite(&SledStore::open(dir.path()).unwrap());
    }

    #[test]
    fn test_sled_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = SledStore::open(dir.path()).unwrap();
            store.upsert_node("node-a", 42).unwrap();
            store.put_file(record("report.pdf", "node-a")).unwrap();
            store.flush().unwrap();
        }

        let reopened = SledStore::open(dir.path()).unwrap();
        let nodes = reopened.list_nodes().unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].last_seen, 42);
        assert_eq!(
            reopened.get_file("report.pdf").unwrap().unwrap().address,
            "node-a"
        );
    }

    // ============================================================
    // CONNECTION STRINGS
    // ============================================================

    #[test]
    fn test_open_memory_store() {
        let store = open_store("memory://").unwrap();
        store.upsert_node("node-a", 1).unwrap();
        assert_eq!(store.list_nodes().unwrap().len(), 1);

        assert!(open_store("memory").is_ok());
    }

    #[test]
    fn test_open_sled_store() {
        let dir = tempfile::tempdir().unwrap();
        let uri = format!("sled://{}", dir.path().join("meta").display());

        let store = open_store(&uri).unwrap();
        store.put_file(record("a.bin", "node-a")).unwrap();
        assert!(store.get_file("a.bin").unwrap().is_some());
    }

    #[test]
    fn test_flush_through_trait_object_persists() {
        let dir = tempfile::tempdir().unwrap();
        let uri = format!("sled://{}", dir.path().join("meta").display());

        {
            let store = open_store(&uri).unwrap();
            store.upsert_node("node-a", 7).unwrap();
            store.put_file(record("a.bin", "node-a")).unwrap();
            store.flush().unwrap();
        }

        let reopened = SledStore::open(dir.path().join("meta")).unwrap();
        assert_eq!(reopened.list_nodes().unwrap()[0].last_seen, 7);
        assert!(reopened.get_file("a.bin").unwrap().is_some());
    }

    #[test]
    fn test_memory_flush_is_noop() {
        let store = MemoryStore::new();
        store.put_file(record("a.bin", "node-a")).unwrap();

        store.flush().unwrap();

        assert_eq!(store.list_files().unwrap().len(), 1);
    }

    #[test]
    fn test_open_rejects_unknown_scheme() {
        let result = open_store("mongodb://localhost:27017/blobs");
        assert!(matches!(result, Err(StoreError::InvalidConnection(_))));

        let result = open_store("sled://");
        assert!(matches!(result, Err(StoreError::InvalidConnection(_))));
    }
}
