//! Service plumbing shared by HR Desk binaries: health probes, request ids,
//! tracing bootstrap and wire-format helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
