//! Auth types shared across HR Desk crates.
//!
//! Token issuance happens upstream; services only see the `CallerContext`
//! the gateway injects.

pub mod identity;

/// Header carrying the authenticated account id (UUID).
pub const USER_ID_HEADER: &str = "x-hrdesk-user-id";

/// Header carrying the authenticated account roles (comma-separated).
pub const USER_ROLES_HEADER: &str = "x-hrdesk-user-roles";
