//! Domain types shared across HR Desk crates.
//!
//! Pure types with no framework dependencies: request and report enums, the
//! Sunday-Saturday week window and the team visibility table.

pub mod leave;
pub mod pagination;
pub mod report;
pub mod role;
pub mod team;
pub mod week;

/// Returned when a wire string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
