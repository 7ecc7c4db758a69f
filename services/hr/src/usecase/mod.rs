use hrdesk_auth_types::identity::CallerContext;

use crate::error::HrServiceError;

pub mod employee;
pub mod profile;
pub mod random_wfh;
pub mod report;
pub mod request;
pub mod schedule;

pub(crate) fn require_admin(caller: &CallerContext) -> Result<(), HrServiceError> {
    if caller.is_admin() {
        Ok(())
    } else {
        Err(HrServiceError::Forbidden)
    }
}
