//! Account roles.

use serde::{Deserialize, Serialize};

/// Role attached to an account. Only `Admin` grants elevated privileges.
///
/// Wire format: lowercase name (`"user"`, `"admin"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Convert from a wire name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse a comma-separated role list, dropping unknown names.
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',').filter_map(Self::from_name).collect()
    }
}
