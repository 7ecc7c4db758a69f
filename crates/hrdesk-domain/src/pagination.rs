//! Result-size limits for "most recent first" listings.

use serde::{Deserialize, Serialize};

/// Number of newest records to return.
///
/// - `limit`: 1–100, default 10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentLimit {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    10
}

impl Default for RecentLimit {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

impl RecentLimit {
    /// Build from an optional raw value. Zero and absent both fall back to the default,
    /// matching clients that send `limit=0` to mean "whatever the server picks".
    pub fn from_raw(raw: Option<u32>) -> Self {
        match raw {
            Some(0) | None => Self::default(),
            Some(limit) => Self { limit },
        }
        .clamped()
    }

    /// Clamp `limit` to the valid range 1–100.
    pub fn clamped(self) -> Self {
        Self {
            limit: self.limit.clamp(1, 100),
        }
    }
}
