use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use hrdesk_domain::leave::{RequestSource, RequestStatus, RequestType};
use hrdesk_domain::report::{Gender, ReportStatus, RiskLevel, ScanType};
use hrdesk_domain::role::Role;

/// Branch assigned when an employee is added without one.
pub const DEFAULT_BRANCH: &str = "المركز الرئيسي";

/// Job position printed on the HR form when the employee record has none.
pub const DEFAULT_JOB_POSITION: &str = "مهندس برمجيات";

/// Length of the generated initial password for new employees.
pub const GENERATED_PASSWORD_LEN: usize = 12;

/// Account record. An account with an `employee_code` is an employee.
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub active: bool,
    pub full_name: Option<String>,
    pub full_name_localized: Option<String>,
    pub employee_code: Option<String>,
    pub fingerprint_code: Option<String>,
    pub job_position: Option<String>,
    pub branch: String,
    pub title: Option<String>,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Full name, falling back to the account username.
    pub fn display_name(&self) -> &str {
        non_empty(self.full_name.as_deref()).unwrap_or(self.username.as_str())
    }

    /// Localized full name, then full name, then username.
    pub fn localized_name(&self) -> &str {
        non_empty(self.full_name_localized.as_deref()).unwrap_or_else(|| self.display_name())
    }
}

/// Self-service profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub phone_number: String,
    pub city: String,
    pub country: String,
    pub location: String,
    pub platform_usage_count: i32,
}

impl Profile {
    /// Stored location, or "city, country" when none was set.
    pub fn display_location(&self) -> String {
        if self.location.is_empty() {
            format!("{}, {}", self.city, self.country)
        } else {
            self.location.clone()
        }
    }
}

/// A leave / WFH request with its explicitly selected days.
#[derive(Debug, Clone)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    /// Name snapshot taken when the request was filed.
    pub employee_name: String,
    pub employee_code: Option<String>,
    pub request_type: RequestType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub selected_dates: Vec<NaiveDate>,
    pub number_of_days: u32,
    pub reason: String,
    pub notes: String,
    pub status: RequestStatus,
    pub source: RequestSource,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Text shown on the schedule: notes, then reason, then the type label.
    pub fn purpose(&self) -> &str {
        non_empty(Some(self.notes.as_str()))
            .or(non_empty(Some(self.reason.as_str())))
            .unwrap_or(self.request_type.default_label())
    }
}

/// Row of the localized HR form export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HrFormRow {
    pub id: Uuid,
    pub code: String,
    pub fingerprint: String,
    pub employee_name: String,
    pub job_position: String,
    pub branch: String,
    pub time_off_type: &'static str,
    pub request_type: RequestType,
    pub purpose: &'static str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub number_of_days: String,
}

impl HrFormRow {
    /// Reshape an approved request. `employee` is `None` when the owner has been
    /// deleted; the row then falls back to the request's snapshots.
    pub fn new(request: &LeaveRequest, employee: Option<&Employee>) -> Self {
        let employee_name = employee
            .and_then(|e| {
                non_empty(e.full_name_localized.as_deref()).or(non_empty(e.full_name.as_deref()))
            })
            .unwrap_or(request.employee_name.as_str())
            .to_owned();
        Self {
            id: request.id,
            code: request.employee_code.clone().unwrap_or_default(),
            fingerprint: employee
                .and_then(|e| e.fingerprint_code.clone())
                .unwrap_or_default(),
            employee_name,
            job_position: employee
                .and_then(|e| non_empty(e.job_position.as_deref()))
                .unwrap_or(DEFAULT_JOB_POSITION)
                .to_owned(),
            branch: employee.map(|e| e.branch.clone()).unwrap_or_default(),
            time_off_type: request.request_type.hr_time_off_type(),
            request_type: request.request_type,
            purpose: request.request_type.hr_category(),
            start_date: request.start_date,
            end_date: request.end_date,
            number_of_days: request.number_of_days.to_string(),
        }
    }
}

/// Diagnostic report saved by an account.
#[derive(Debug, Clone)]
pub struct Report {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub patient_name: String,
    pub age: u32,
    pub gender: Gender,
    pub scan_type: ScanType,
    pub clinical_notes: String,
    pub diagnosis: String,
    pub confidence: f64,
    pub status: ReportStatus,
    pub risk_level: RiskLevel,
    pub details: String,
    pub recommendations: Vec<String>,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Out-of-band notification written alongside a state change.
#[derive(Debug, Clone)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
}

/// Parse a calendar date. Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp which
/// is read as the date it falls on in `tz`.
pub fn parse_calendar_date(raw: &str, tz: Tz) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&tz).date_naive())
}

/// Treat an empty string the same as an absent value.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
