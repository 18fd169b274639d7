//! Distributed Blob Store Library
//!
//! This library crate defines the modules behind the `blobstore` binary (`main.rs`),
//! which runs either as the Controller or as a storage Node.
//!
//! ## Architecture Modules
//! - **`metadata`**: The Controller's backing store (in-memory or sled), accessed through
//!   the `MetadataStore` trait and built once at startup.
//! - **`registry`**: The Node Registry. Heartbeats upsert Node addresses with a last-seen time.
//! - **`directory`**: The File Directory. Maps each filename to the single Node holding it.
//! - **`placement`**: The policy choosing a Node for each new upload (uniform random by default).
//! - **`controller`**: Upload/download routing and the Controller's HTTP API.
//! - **`node`**: The storage Node, with its local blob store, HTTP API and heartbeat task.
//! - **`config`**: Command-line and environment configuration for both roles.
//! - **`error`**: The error taxonomy and its HTTP mapping.

pub mod config;
pub mod controller;
pub mod directory;
pub mod error;
pub mod metadata;
pub mod node;
pub mod placement;
pub mod registry;
