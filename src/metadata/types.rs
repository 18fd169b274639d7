use serde::{Deserialize, Serialize};

/// A storage Node known to the Controller.
///
/// Created by the first heartbeat and refreshed by every later one.
/// Entries are never removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageNode {
    pub address: String,
    /// Unix milliseconds of the most recent heartbeat.
    pub last_seen: u64,
}

/// Directory entry: which Node currently holds a file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    pub filename: String,
    pub address: String,
}

pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
