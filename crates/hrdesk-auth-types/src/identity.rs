//! Gateway-injected caller identity extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use hrdesk_domain::role::Role;

use crate::{USER_ID_HEADER, USER_ROLES_HEADER};

/// Authenticated caller, injected by the gateway via `x-hrdesk-user-id` and
/// `x-hrdesk-user-roles` headers.
///
/// Returns 401 if either header is absent or the id cannot be parsed as UUID.
/// Unknown role names are dropped. Role enforcement (403) is done by use cases
/// after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    pub user_id: Uuid,
    pub roles: Vec<Role>,
}

impl CallerContext {
    pub fn new(user_id: Uuid, roles: Vec<Role>) -> Self {
        Self { user_id, roles }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

impl<S> FromRequestParts<S> for CallerContext
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send`; extract synchronously
    // and hand back a 'static future so no borrow of `parts` is captured.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        let roles = parts
            .headers
            .get(USER_ROLES_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(Role::parse_list);

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let roles = roles.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { user_id, roles })
        }
    }
}
