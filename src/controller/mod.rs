//! Controller Module
//!
//! The control-plane process. It owns the Node Registry and the File Directory and
//! routes client traffic to storage Nodes.
//!
//! ## Request Flows
//! - **Register**: a Node heartbeat upserts its address in the Registry.
//! - **Upload**: Registry -> Placement -> stream to the chosen Node -> record in the Directory.
//!   The Directory is only touched after the Node acknowledged the write.
//! - **Download**: Directory lookup -> stream back from the owning Node, never buffered whole.
//!
//! ## Submodules
//! - **`service`**: `Controller`, the routing logic independent of HTTP.
//! - **`client`**: `NodeClient`, the seam to storage Nodes (HTTP in production).
//! - **`handlers`**: axum endpoints.
//! - **`protocol`**: endpoint paths and JSON bodies.

pub mod client;
pub mod handlers;
pub mod protocol;
pub mod service;
