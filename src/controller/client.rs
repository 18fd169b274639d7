use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};

use super::protocol::http_base;
use crate::error::{BlobError, Result};
use crate::node::blobs::{ByteStream, RetrievedBlob};
use crate::node::protocol::{ENDPOINT_RETRIEVE, ENDPOINT_STORE};

/// The Controller's view of a storage Node's store/retrieve contract.
///
/// Calls carry no deadline: each one completes or fails outright.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Streams `body` to the Node at `address`.
    ///
    /// # Errors
    /// - `BlobError::UploadFailed` - Node unreachable or rejected the write
    async fn store(&self, address: &str, filename: &str, body: ByteStream) -> Result<()>;

    /// Opens the Node's copy of `filename` as a stream.
    ///
    /// # Errors
    /// - `BlobError::FileNotFound` - Node reports no such blob
    /// - `BlobError::RetrieveFailed` - Node unreachable or failed
    async fn retrieve(&self, address: &str, filename: &str) -> Result<RetrievedBlob>;
}

/// `NodeClient` over HTTP, talking to the endpoints in `node::protocol`.
#[derive(Clone, Default)]
pub struct HttpNodeClient {
    http_client: reqwest::Client,
}

impl HttpNodeClient {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `{base}{endpoint}/{filename}` with the filename percent-encoded as one segment.
fn node_url(
    address: &str,
    endpoint: &str,
    filename: &str,
) -> std::result::Result<reqwest::Url, String> {
    let mut url = reqwest::Url::parse(&format!("{}{}", http_base(address), endpoint))
        .map_err(|e| format!("invalid node address {}: {}", address, e))?;
    url.path_segments_mut()
        .map_err(|_| format!("node address {} cannot be a base URL", address))?
        .push(filename);
    Ok(url)
}

#[async_trait]
impl NodeClient for HttpNodeClient {
    async fn store(&self, address: &str, filename: &str, body: ByteStream) -> Result<()> {
        let upload_failed = |reason: String| BlobError::UploadFailed {
            filename: filename.to_string(),
            address: address.to_string(),
            reason,
        };

        let url = node_url(address, ENDPOINT_STORE, filename).map_err(upload_failed)?;

        let response = self
            .http_client
            .post(url)
            .body(reqwest::Body::wrap_stream(body))
            .send()
            .await
            .map_err(|e| upload_failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(upload_failed(format!("node responded {}", response.status())));
        }

        Ok(())
    }

    async fn retrieve(&self, address: &str, filename: &str) -> Result<RetrievedBlob> {
        let retrieve_failed = |reason: String| BlobError::RetrieveFailed {
            filename: filename.to_string(),
            address: address.to_string(),
            reason,
        };

        let url = node_url(address, ENDPOINT_RETRIEVE, filename).map_err(retrieve_failed)?;

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| retrieve_failed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(BlobError::FileNotFound {
                filename: filename.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(retrieve_failed(format!("node responded {}", response.status())));
        }

        Ok(RetrievedBlob {
            len: response.content_length(),
            stream: response
                .bytes_stream()
                .map_err(std::io::Error::other)
                .boxed(),
        })
    }
}
