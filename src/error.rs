//! Error taxonomy shared by the Controller and the storage Nodes.
//!
//! Every failure a caller can observe is a `BlobError`. Variants are grouped into
//! four kinds (see [`ErrorKind`]) and each kind maps to one HTTP status, so the
//! handlers never pick status codes by hand.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::metadata::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required input missing or malformed.
    Validation,
    /// Unknown filename, or a blob missing on the owning Node.
    NotFound,
    /// No storage Node registered at upload time.
    Unavailable,
    /// Backing store, filesystem or forwarding fault.
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("{0}")]
    Validation(String),

    #[error("file not found: {filename}")]
    FileNotFound { filename: String },

    #[error("file not found on this node: {filename}")]
    FileNotFoundLocal { filename: String },

    #[error("no storage nodes available")]
    NoNodesAvailable,

    #[error("node registry error: {0}")]
    Registry(#[source] StoreError),

    #[error("file directory error: {0}")]
    Directory(#[source] StoreError),

    #[error("upload of {filename} to {address} failed: {reason}")]
    UploadFailed {
        filename: String,
        address: String,
        reason: String,
    },

    #[error("retrieve of {filename} from {address} failed: {reason}")]
    RetrieveFailed {
        filename: String,
        address: String,
        reason: String,
    },

    #[error("local storage write failed: {0}")]
    StorageWrite(#[source] std::io::Error),

    #[error("local storage read failed: {0}")]
    StorageRead(#[source] std::io::Error),
}

impl BlobError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlobError::Validation(_) => ErrorKind::Validation,
            BlobError::FileNotFound { .. } | BlobError::FileNotFoundLocal { .. } => {
                ErrorKind::NotFound
            }
            BlobError::NoNodesAvailable => ErrorKind::Unavailable,
            BlobError::Registry(_)
            | BlobError::Directory(_)
            | BlobError::UploadFailed { .. }
            | BlobError::RetrieveFailed { .. }
            | BlobError::StorageWrite(_)
            | BlobError::StorageRead(_) => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body returned with every error status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for BlobError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub type Result<T, E = BlobError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_map_to_distinct_statuses() {
        let missing = BlobError::FileNotFound {
            filename: "report.pdf".to_string(),
        };
        let unavailable = BlobError::NoNodesAvailable;

        assert_eq!(missing.kind(), ErrorKind::NotFound);
        assert_eq!(unavailable.kind(), ErrorKind::Unavailable);
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_local_miss_is_not_found() {
        let err = BlobError::FileNotFoundLocal {
            filename: "a.txt".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("a.txt"));
    }

    #[test]
    fn test_forwarding_faults_are_internal() {
        let err = BlobError::UploadFailed {
            filename: "a.txt".to_string(),
            address: "127.0.0.1:4000".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = BlobError::StorageWrite(std::io::Error::other("disk full"));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_validation_is_bad_request() {
        let err = BlobError::Validation("Node address is required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Node address is required");
    }
}
