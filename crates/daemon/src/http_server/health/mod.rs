//! Health and status endpoints for external probes.

pub mod liveness;
pub mod version;
