//! Extractors whose rejections use the service's `{kind, message}` body
//! instead of axum's plain-text defaults.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path};

use crate::error::HrServiceError;

/// JSON body; a malformed or wrongly typed body is a 400 `INVALID_BODY`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(HrServiceError))]
pub struct JsonBody<T>(pub T);

/// Path parameters; an unparsable segment is a 400 `INVALID_ID`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(HrServiceError))]
pub struct IdPath<T>(pub T);

impl From<JsonRejection> for HrServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for HrServiceError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidId(rejection.body_text())
    }
}
