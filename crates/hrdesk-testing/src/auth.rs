//! Mock auth helpers for integration tests.
//!
//! Services behind the gateway receive `x-hrdesk-user-id` + `x-hrdesk-user-roles`
//! headers injected by the gateway. In tests, `MockAuth` produces these headers
//! directly so no real gateway or token is needed.

use axum::http::{HeaderName, HeaderValue};
use uuid::Uuid;

use hrdesk_auth_types::identity::CallerContext;
use hrdesk_auth_types::{USER_ID_HEADER, USER_ROLES_HEADER};
use hrdesk_domain::role::Role;

/// Configurable identity injected into test requests.
#[derive(Debug, Clone)]
pub struct MockAuth {
    pub user_id: Uuid,
    pub roles: Vec<Role>,
}

impl MockAuth {
    pub fn new(user_id: Uuid, roles: Vec<Role>) -> Self {
        Self { user_id, roles }
    }

    pub fn employee() -> Self {
        Self::new(Uuid::new_v4(), vec![Role::User])
    }

    pub fn admin() -> Self {
        Self::new(Uuid::new_v4(), vec![Role::User, Role::Admin])
    }

    /// The extractor value a handler would see for these headers.
    pub fn caller(&self) -> CallerContext {
        CallerContext::new(self.user_id, self.roles.clone())
    }

    /// Header pairs as if the gateway injected them.
    pub fn header_pairs(&self) -> [(HeaderName, HeaderValue); 2] {
        let roles = self
            .roles
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(",");
        [
            (
                HeaderName::from_static(USER_ID_HEADER),
                HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
            ),
            (
                HeaderName::from_static(USER_ROLES_HEADER),
                HeaderValue::from_str(&roles).unwrap(),
            ),
        ]
    }
}
