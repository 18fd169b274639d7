//! File Directory
//!
//! Maps each filename to the address of the Node that holds its single copy.
//! Writes are unconditional: re-uploading a filename repoints it and the previous
//! Node's blob is left on disk unreferenced.

pub mod service;
