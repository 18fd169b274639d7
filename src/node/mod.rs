//! Storage Node Service
//!
//! A Node owns a local directory of blobs and serves two internal endpoints to the
//! Controller: store and retrieve. It never sees another Node's files.
//!
//! ## Components
//! - **`blobs`**: `BlobStore`, the on-disk namespace. Writes are staged and renamed into place.
//! - **`handlers`**: axum endpoints streaming bytes in and out of the `BlobStore`.
//! - **`heartbeat`**: the recurring registration task against the Controller. Failures are
//!   logged and retried on the next tick, never surfaced.

pub mod blobs;
pub mod handlers;
pub mod heartbeat;
pub mod protocol;
