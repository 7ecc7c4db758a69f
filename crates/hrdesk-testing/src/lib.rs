//! Test utilities for HR Desk services.
//!
//! Provides `MockAuth` gateway headers and calendar fixtures.
//! Import in `#[cfg(test)]` blocks and `tests/` only, never in production code.

pub mod auth;
pub mod fixture;
