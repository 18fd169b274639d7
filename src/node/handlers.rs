use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Extension, Path};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::{StreamExt, TryStreamExt};
use std::sync::Arc;

use super::blobs::{BlobStore, RetrievedBlob};
use super::protocol::{ENDPOINT_RETRIEVE, ENDPOINT_STORE, StoreResponse};
use crate::error::BlobError;

pub fn routes(store: Arc<BlobStore>) -> Router {
    Router::new()
        .route(&format!("{}/:filename", ENDPOINT_STORE), post(handle_store))
        .route(
            &format!("{}/:filename", ENDPOINT_RETRIEVE),
            get(handle_retrieve),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(Extension(store))
}

pub async fn handle_store(
    Extension(store): Extension<Arc<BlobStore>>,
    Path(filename): Path<String>,
    body: Body,
) -> Result<(StatusCode, Json<StoreResponse>), BlobError> {
    let stream = body
        .into_data_stream()
        .map_err(std::io::Error::other)
        .boxed();

    let bytes = store.store(&filename, stream).await?;

    Ok((StatusCode::OK, Json(StoreResponse { filename, bytes })))
}

pub async fn handle_retrieve(
    Extension(store): Extension<Arc<BlobStore>>,
    Path(filename): Path<String>,
) -> Result<Response, BlobError> {
    match store.retrieve(&filename).await {
        Ok(blob) => {
            tracing::debug!("Serving {} ({:?} bytes)", filename, blob.len);
            Ok(blob_response(&filename, blob))
        }
        Err(e) => {
            tracing::debug!("Retrieve of {} failed: {}", filename, e);
            Err(e)
        }
    }
}

/// Streams a blob back as a file download.
pub fn blob_response(filename: &str, blob: RetrievedBlob) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    if let Some(len) = blob.len {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    }
    match content_disposition(filename) {
        Some(value) => {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }
        None => tracing::debug!("No Content-Disposition for {:?}", filename),
    }

    (StatusCode::OK, headers, Body::from_stream(blob.stream)).into_response()
}

/// `attachment` disposition with a printable ASCII `filename`. Names that do not
/// survive that form also get the exact name as an RFC 5987 `filename*` parameter.
fn content_disposition(filename: &str) -> Option<HeaderValue> {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();

    let mut value = format!("attachment; filename=\"{}\"", fallback);
    if fallback != filename {
        value.push_str(&format!("; filename*=UTF-8''{}", urlencoding::encode(filename)));
    }
    HeaderValue::from_str(&value).ok()
}
