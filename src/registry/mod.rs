//! Node Registry
//!
//! The Controller's view of cluster membership: every address that has ever sent a
//! heartbeat, with the time of its latest one.
//!
//! ## Behavior
//! - **Upsert on heartbeat**: the first heartbeat creates the entry, later ones refresh `last_seen`.
//! - **No expiry**: entries are never dropped, and a silent Node stays a placement candidate.

pub mod service;
