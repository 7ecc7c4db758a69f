use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use sea_orm::DatabaseConnection;

use hrdesk_domain::team::TeamDirectory;

use crate::infra::db::{DbEmployeeRepository, DbLeaveRequestRepository, DbReportRepository};
use crate::infra::password::Argon2Hasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub work_timezone: Tz,
    pub teams: Arc<TeamDirectory>,
}

impl AppState {
    pub fn employee_repo(&self) -> DbEmployeeRepository {
        DbEmployeeRepository {
            db: self.db.clone(),
        }
    }

    pub fn request_repo(&self) -> DbLeaveRequestRepository {
        DbLeaveRequestRepository {
            db: self.db.clone(),
        }
    }

    pub fn report_repo(&self) -> DbReportRepository {
        DbReportRepository {
            db: self.db.clone(),
        }
    }

    pub fn password_hasher(&self) -> Argon2Hasher {
        Argon2Hasher
    }

    /// Current calendar date in the work timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.work_timezone).date_naive()
    }
}
