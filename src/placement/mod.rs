//! Placement Policy
//!
//! Chooses which registered Node receives a new upload. The policy is a trait so the
//! Controller can be driven by a deterministic stub in tests. The default policy
//! is uniform random with no weighting and no health filtering.

pub mod policy;
