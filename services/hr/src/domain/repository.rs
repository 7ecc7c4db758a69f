#![allow(async_fn_in_trait)]

use chrono::NaiveDate;
use uuid::Uuid;

use hrdesk_domain::leave::{RequestSource, RequestStatus};
use hrdesk_domain::team::Visibility;

use crate::domain::types::{Employee, LeaveRequest, OutboxEvent, Report};
use crate::error::HrServiceError;

/// Repository for accounts and employee records.
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, HrServiceError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Employee>, HrServiceError>;

    /// Records holding an employee code that `visibility` allows, ordered by full name.
    async fn list_employees(
        &self,
        visibility: &Visibility,
    ) -> Result<Vec<Employee>, HrServiceError>;

    /// Whether another record (not `exclude`) already uses any of the given
    /// email, employee code or fingerprint code.
    async fn identity_taken(
        &self,
        email: Option<&str>,
        employee_code: Option<&str>,
        fingerprint_code: Option<&str>,
        exclude: Option<Uuid>,
    ) -> Result<bool, HrServiceError>;

    /// Insert a new employee and an outbox event atomically (same transaction).
    async fn create_with_outbox(
        &self,
        employee: &Employee,
        event: &OutboxEvent,
    ) -> Result<(), HrServiceError>;

    /// Persist every mutable field of `employee`.
    async fn update(&self, employee: &Employee) -> Result<(), HrServiceError>;

    /// Delete a record. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, HrServiceError>;
}

/// Repository for leave / WFH requests.
pub trait LeaveRequestRepository: Send + Sync {
    /// Insert a request together with its selected dates.
    async fn create(&self, request: &LeaveRequest) -> Result<(), HrServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LeaveRequest>, HrServiceError>;

    /// All requests from `source`, newest first.
    async fn list_by_source(
        &self,
        source: RequestSource,
    ) -> Result<Vec<LeaveRequest>, HrServiceError>;

    /// One employee's requests, newest first, at most `limit`.
    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        limit: u32,
    ) -> Result<Vec<LeaveRequest>, HrServiceError>;

    /// Approved requests of the given employees whose span overlaps `[from, to]`.
    async fn list_approved_overlapping(
        &self,
        employee_ids: &[Uuid],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LeaveRequest>, HrServiceError>;

    /// Every approved request, latest start date first.
    async fn list_approved(&self) -> Result<Vec<LeaveRequest>, HrServiceError>;

    /// Set the status. Returns the updated request, or `None` if it does not exist.
    async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<Option<LeaveRequest>, HrServiceError>;

    /// Delete a request. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, HrServiceError>;

    /// Delete every approved request. Returns the number of rows deleted.
    async fn delete_approved(&self) -> Result<u64, HrServiceError>;
}

/// Repository for diagnostic reports. Every read is scoped to the owner.
pub trait ReportRepository: Send + Sync {
    /// Insert a report and bump the owner's platform usage counter atomically.
    async fn create(&self, report: &Report) -> Result<(), HrServiceError>;

    /// The owner's reports, newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Report>, HrServiceError>;

    async fn find_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Report>, HrServiceError>;

    /// Delete an owned report. Returns `true` if a row was deleted.
    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> Result<bool, HrServiceError>;
}

/// One-way password hashing for generated credentials.
pub trait PasswordHasherPort: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, HrServiceError>;
}
