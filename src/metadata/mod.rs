//! Controller Metadata Store
//!
//! Backing storage for the Node Registry and the File Directory.
//!
//! The store is built once at process start from a connection string and handed to
//! each component as an `Arc<dyn MetadataStore>`.
//!
//! ## Backends
//! - **`memory://`**: `MemoryStore`, DashMap-backed and volatile.
//! - **`sled://<path>`**: `SledStore`, an embedded sled database that survives restarts.
//!
//! Every operation is atomic per key. Nothing spans more than one key.

pub mod memory;
pub mod sled_store;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod faulty;

#[cfg(test)]
mod tests;
