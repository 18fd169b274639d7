//! Node Network Protocol
//!
//! Endpoints the Controller calls on a storage Node. Payloads travel as raw
//! request/response bodies; only the acknowledgments are JSON.

use serde::{Deserialize, Serialize};

/// Stores the request body under the trailing path segment.
pub const ENDPOINT_STORE: &str = "/store-file";
/// Streams back the blob named by the trailing path segment.
pub const ENDPOINT_RETRIEVE: &str = "/retrieve-file";

/// Acknowledgment for a completed store.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreResponse {
    pub filename: String,
    /// Number of bytes written to disk.
    pub bytes: u64,
}
