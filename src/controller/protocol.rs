//! Controller Network Protocol
//!
//! Public endpoints served by the Controller and the JSON bodies they exchange.
//! Upload and download payloads are raw bodies, streamed in both directions.

use serde::{Deserialize, Serialize};

/// Heartbeat/registration from storage Nodes.
pub const ENDPOINT_REGISTER: &str = "/nodes/register";
/// Registry listing.
pub const ENDPOINT_NODES: &str = "/nodes";
/// Client upload, filename as trailing path segment.
pub const ENDPOINT_UPLOAD: &str = "/files/upload";
/// Client download, filename as trailing path segment.
pub const ENDPOINT_DOWNLOAD: &str = "/files/download";
/// Directory listing.
pub const ENDPOINT_FILES: &str = "/files";

/// Body of a Node heartbeat.
///
/// `address` is optional on the wire so a missing field is reported as a validation
/// failure rather than a decoding error.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// Result of a successful upload: where the file now lives.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub address: String,
}

/// Base URL for a Node or Controller address. Bare `host:port` means plain HTTP.
pub fn http_base(address: &str) -> String {
    let address = address.trim().trim_end_matches('/');
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    }
}
