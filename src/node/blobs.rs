use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::io::AsyncWriteExt;
use tokio_util::io::{ReaderStream, StreamReader};
use uuid::Uuid;

use crate::error::{BlobError, Result};

/// Staging area for in-flight writes, inside the storage directory.
pub const STAGING_DIR: &str = ".incoming";

/// Blob payloads move through the system as chunk streams, never as whole buffers.
pub type ByteStream = BoxStream<'static, io::Result<Bytes>>;

/// A blob being read back, with its size when known.
pub struct RetrievedBlob {
    pub len: Option<u64>,
    pub stream: ByteStream,
}

/// Rejects names that could escape or collide with the Node's namespace.
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty() {
        return Err(BlobError::Validation("Filename is required".to_string()));
    }
    if filename == "." || filename == ".." || filename == STAGING_DIR {
        return Err(BlobError::Validation(format!("Invalid filename: {}", filename)));
    }
    if filename.contains(['/', '\\', '\0']) {
        return Err(BlobError::Validation(format!(
            "Filename must not contain path separators: {}",
            filename
        )));
    }
    Ok(())
}

/// A Node's local blob namespace: one file per blob under `root`.
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Opens the storage directory, creating it on first run.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(root.join(STAGING_DIR))
            .await
            .map_err(BlobError::StorageWrite)?;
        tracing::info!("Blob storage ready at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Writes `body` as `filename`, replacing any previous blob of that name.
    ///
    /// Bytes go to a staging file first and are renamed into place once complete,
    /// so a reader sees either the old blob or the new one.
    pub async fn store(&self, filename: &str, body: ByteStream) -> Result<u64> {
        validate_filename(filename)?;

        let staging = self
            .root
            .join(STAGING_DIR)
            .join(format!("{}.part", Uuid::new_v4()));

        match self.write_staged(&staging, body).await {
            Ok(written) => {
                if let Err(e) = tokio::fs::rename(&staging, self.path_for(filename)).await {
                    let _ = tokio::fs::remove_file(&staging).await;
                    return Err(BlobError::StorageWrite(e));
                }
                tracing::info!("Stored file: {} ({} bytes)", filename, written);
                Ok(written)
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&staging).await;
                tracing::error!("Failed to store {}: {}", filename, e);
                Err(BlobError::StorageWrite(e))
            }
        }
    }

    async fn write_staged(&self, staging: &Path, body: ByteStream) -> io::Result<u64> {
        let mut file = tokio::fs::File::create(staging).await?;
        let mut reader = StreamReader::new(body);
        let written = tokio::io::copy(&mut reader, &mut file).await?;
        file.flush().await?;
        file.sync_all().await?;
        Ok(written)
    }

    /// Opens `filename` for streaming.
    pub async fn retrieve(&self, filename: &str) -> Result<RetrievedBlob> {
        validate_filename(filename)?;

        let file = match tokio::fs::File::open(self.path_for(filename)).await {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(BlobError::FileNotFoundLocal {
                    filename: filename.to_string(),
                });
            }
            Err(e) => return Err(BlobError::StorageRead(e)),
        };

        let metadata = file.metadata().await.map_err(BlobError::StorageRead)?;
        if !metadata.is_file() {
            return Err(BlobError::FileNotFoundLocal {
                filename: filename.to_string(),
            });
        }

        Ok(RetrievedBlob {
            len: Some(metadata.len()),
            stream: ReaderStream::new(file).boxed(),
        })
    }
}

/// Wraps an in-memory payload as a `ByteStream`, split into `chunk_size` pieces.
#[cfg(test)]
pub(crate) fn chunked_stream(data: Bytes, chunk_size: usize) -> ByteStream {
    let chunk_size = chunk_size.max(1);
    let chunks: Vec<io::Result<Bytes>> = (0..data.len())
        .step_by(chunk_size)
        .map(|start| Ok(data.slice(start..(start + chunk_size).min(data.len()))))
        .collect();
    futures::stream::iter(chunks).boxed()
}
