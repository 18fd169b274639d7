use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Extension, Path};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::{StreamExt, TryStreamExt};
use std::sync::Arc;

use super::protocol::*;
use super::service::Controller;
use crate::error::BlobError;
use crate::metadata::types::{FileRecord, StorageNode};
use crate::node::handlers::blob_response;

pub fn routes(controller: Arc<Controller>) -> Router {
    Router::new()
        .route(ENDPOINT_REGISTER, post(handle_register))
        .route(ENDPOINT_NODES, get(handle_list_nodes))
        .route(ENDPOINT_FILES, get(handle_list_files))
        .route(&format!("{}/:filename", ENDPOINT_UPLOAD), post(handle_upload))
        .route(
            &format!("{}/:filename", ENDPOINT_DOWNLOAD),
            get(handle_download),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(Extension(controller))
}

pub async fn handle_register(
    Extension(controller): Extension<Arc<Controller>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), BlobError> {
    // A missing or unreadable body counts as a missing address.
    let address = match payload {
        Ok(Json(req)) => req.address.unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!("Register request without usable JSON body: {}", rejection);
            String::new()
        }
    };

    if let Err(e) = controller.register(&address) {
        tracing::error!("Error registering node: {}", e);
        return Err(e);
    }

    Ok((
        StatusCode::OK,
        Json(RegisterResponse {
            message: "Registration successful".to_string(),
        }),
    ))
}

pub async fn handle_list_nodes(
    Extension(controller): Extension<Arc<Controller>>,
) -> Result<Json<Vec<StorageNode>>, BlobError> {
    Ok(Json(controller.nodes()?))
}

pub async fn handle_list_files(
    Extension(controller): Extension<Arc<Controller>>,
) -> Result<Json<Vec<FileRecord>>, BlobError> {
    Ok(Json(controller.files()?))
}

pub async fn handle_upload(
    Extension(controller): Extension<Arc<Controller>>,
    Path(filename): Path<String>,
    body: Body,
) -> Result<(StatusCode, Json<UploadResponse>), BlobError> {
    let stream = body
        .into_data_stream()
        .map_err(std::io::Error::other)
        .boxed();

    match controller.upload(&filename, stream).await {
        Ok(address) => Ok((StatusCode::OK, Json(UploadResponse { filename, address }))),
        Err(e) => {
            tracing::error!("Error during file upload of {}: {}", filename, e);
            Err(e)
        }
    }
}

pub async fn handle_download(
    Extension(controller): Extension<Arc<Controller>>,
    Path(filename): Path<String>,
) -> Result<Response, BlobError> {
    match controller.download(&filename).await {
        Ok(blob) => Ok(blob_response(&filename, blob)),
        Err(e) => {
            tracing::error!("Error during file download of {}: {}", filename, e);
            Err(e)
        }
    }
}
