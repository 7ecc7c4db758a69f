use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use hrdesk_auth_types::identity::CallerContext;
use hrdesk_domain::leave::{RequestSource, RequestStatus, RequestType, initial_status};
use hrdesk_domain::pagination::RecentLimit;

use crate::domain::repository::{EmployeeRepository, LeaveRequestRepository};
use crate::domain::types::{HrFormRow, LeaveRequest, non_empty, parse_calendar_date};
use crate::error::HrServiceError;
use crate::usecase::require_admin;

/// Reason stored on requests filed through the admin form.
pub const ADMIN_REQUEST_REASON: &str = "Admin created custom request";

/// Validated core of any request submission.
#[derive(Debug)]
struct RequestFields {
    request_type: RequestType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    number_of_days: u32,
}

fn parse_request_fields(
    request_type: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
    number_of_days: Option<i64>,
    tz: Tz,
) -> Result<RequestFields, HrServiceError> {
    let (Some(request_type), Some(start_date), Some(end_date), Some(number_of_days)) = (
        non_empty(request_type),
        non_empty(start_date),
        non_empty(end_date),
        number_of_days,
    ) else {
        return Err(HrServiceError::MissingData);
    };
    let request_type = request_type
        .parse::<RequestType>()
        .map_err(|_| HrServiceError::InvalidRequestType)?;
    let start_date = parse_calendar_date(start_date, tz).ok_or(HrServiceError::InvalidDate)?;
    let end_date = parse_calendar_date(end_date, tz).ok_or(HrServiceError::InvalidDate)?;
    // Stored as a signed 32-bit column.
    let number_of_days = i32::try_from(number_of_days)
        .ok()
        .filter(|n| *n >= 1)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(HrServiceError::InvalidNumberOfDays)?;
    Ok(RequestFields {
        request_type,
        start_date,
        end_date,
        number_of_days,
    })
}

// ── CreateRequest ────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct CreateRequestInput {
    pub request_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub number_of_days: Option<i64>,
    pub selected_dates: Vec<String>,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
}

pub struct CreateRequestUseCase<E: EmployeeRepository, R: LeaveRequestRepository> {
    pub employees: E,
    pub requests: R,
    pub work_timezone: Tz,
}

impl<E: EmployeeRepository, R: LeaveRequestRepository> CreateRequestUseCase<E, R> {
    pub async fn execute(
        &self,
        caller: &CallerContext,
        input: CreateRequestInput,
    ) -> Result<LeaveRequest, HrServiceError> {
        let fields = parse_request_fields(
            input.request_type.as_deref(),
            input.start_date.as_deref(),
            input.end_date.as_deref(),
            input.number_of_days,
            self.work_timezone,
        )?;
        let selected_dates = input
            .selected_dates
            .iter()
            .map(|raw| parse_calendar_date(raw, self.work_timezone))
            .collect::<Option<Vec<_>>>()
            .ok_or(HrServiceError::InvalidDate)?;
        let source = match non_empty(input.source.as_deref()) {
            Some(raw) => raw
                .parse::<RequestSource>()
                .map_err(|_| HrServiceError::InvalidSource)?,
            None => RequestSource::EmployeeRequest,
        };

        let caller_record = self
            .employees
            .find_by_id(caller.user_id)
            .await?
            .ok_or(HrServiceError::EmployeeNotFound)?;

        // An employee id that does not resolve falls back to the caller.
        let target_id = input
            .employee_id
            .as_deref()
            .and_then(|raw| raw.parse::<Uuid>().ok());
        let owner = match target_id {
            Some(id) if id != caller_record.id => {
                self.employees.find_by_id(id).await?.unwrap_or(caller_record)
            }
            _ => caller_record,
        };

        let employee_name = non_empty(input.employee_name.as_deref())
            .unwrap_or(owner.display_name())
            .to_owned();
        let notes = input.notes.unwrap_or_default();
        let reason = non_empty(input.reason.as_deref())
            .unwrap_or(notes.as_str())
            .to_owned();
        let status = initial_status(source, fields.request_type, input.status.as_deref());

        let now = Utc::now();
        let request = LeaveRequest {
            id: Uuid::now_v7(),
            employee_id: owner.id,
            employee_name,
            employee_code: owner.employee_code.clone(),
            request_type: fields.request_type,
            start_date: fields.start_date,
            end_date: fields.end_date,
            selected_dates,
            number_of_days: fields.number_of_days,
            reason,
            notes,
            status,
            source,
            created_at: now,
            updated_at: now,
        };
        self.requests.create(&request).await?;

        tracing::info!(
            request_id = %request.id,
            employee_id = %request.employee_id,
            request_type = %request.request_type,
            status = %request.status,
            source = %request.source,
            "request created"
        );
        Ok(request)
    }
}

// ── CreateAdminRequest ───────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct CreateAdminRequestInput {
    pub employee_id: Option<String>,
    pub request_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub number_of_days: Option<i64>,
}

pub struct CreateAdminRequestUseCase<E: EmployeeRepository, R: LeaveRequestRepository> {
    pub employees: E,
    pub requests: R,
    pub work_timezone: Tz,
}

impl<E: EmployeeRepository, R: LeaveRequestRepository> CreateAdminRequestUseCase<E, R> {
    pub async fn execute(
        &self,
        caller: &CallerContext,
        input: CreateAdminRequestInput,
    ) -> Result<LeaveRequest, HrServiceError> {
        require_admin(caller)?;
        let employee_id = non_empty(input.employee_id.as_deref()).ok_or(HrServiceError::MissingData)?;
        let fields = parse_request_fields(
            input.request_type.as_deref(),
            input.start_date.as_deref(),
            input.end_date.as_deref(),
            input.number_of_days,
            self.work_timezone,
        )?;
        let employee_id = employee_id
            .parse::<Uuid>()
            .map_err(|_| HrServiceError::EmployeeNotFound)?;
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await?
            .ok_or(HrServiceError::EmployeeNotFound)?;

        let now = Utc::now();
        let request = LeaveRequest {
            id: Uuid::now_v7(),
            employee_id: employee.id,
            employee_name: employee.localized_name().to_owned(),
            employee_code: employee.employee_code.clone(),
            request_type: fields.request_type,
            start_date: fields.start_date,
            end_date: fields.end_date,
            selected_dates: vec![],
            number_of_days: fields.number_of_days,
            reason: ADMIN_REQUEST_REASON.to_owned(),
            notes: String::new(),
            status: RequestStatus::Approved,
            source: RequestSource::AdminDirect,
            created_at: now,
            updated_at: now,
        };
        self.requests.create(&request).await?;

        tracing::info!(
            request_id = %request.id,
            employee_id = %request.employee_id,
            admin_id = %caller.user_id,
            request_type = %request.request_type,
            "admin request created"
        );
        Ok(request)
    }
}

// ── ListRequests (admin) ─────────────────────────────────────────────────────

pub struct ListRequestsUseCase<R: LeaveRequestRepository> {
    pub repo: R,
}

impl<R: LeaveRequestRepository> ListRequestsUseCase<R> {
    /// Employee-submitted requests only; admin-direct entries are excluded.
    pub async fn execute(&self, caller: &CallerContext) -> Result<Vec<LeaveRequest>, HrServiceError> {
        require_admin(caller)?;
        self.repo.list_by_source(RequestSource::EmployeeRequest).await
    }
}

// ── ListMyRequests ───────────────────────────────────────────────────────────

pub struct ListMyRequestsUseCase<E: EmployeeRepository, R: LeaveRequestRepository> {
    pub employees: E,
    pub requests: R,
}

impl<E: EmployeeRepository, R: LeaveRequestRepository> ListMyRequestsUseCase<E, R> {
    pub async fn execute(
        &self,
        caller: &CallerContext,
        limit: RecentLimit,
    ) -> Result<Vec<LeaveRequest>, HrServiceError> {
        let me = self
            .employees
            .find_by_id(caller.user_id)
            .await?
            .ok_or(HrServiceError::EmployeeNotFound)?;
        self.requests
            .list_by_employee(me.id, limit.clamped().limit)
            .await
    }
}

// ── UpdateRequestStatus ──────────────────────────────────────────────────────

pub struct UpdateRequestStatusUseCase<R: LeaveRequestRepository> {
    pub repo: R,
}

impl<R: LeaveRequestRepository> UpdateRequestStatusUseCase<R> {
    pub async fn execute(
        &self,
        caller: &CallerContext,
        request_id: Uuid,
        status: Option<&str>,
    ) -> Result<LeaveRequest, HrServiceError> {
        require_admin(caller)?;
        let status = status
            .and_then(|s| s.parse::<RequestStatus>().ok())
            .ok_or(HrServiceError::InvalidStatus)?;
        let updated = self
            .repo
            .update_status(request_id, status)
            .await?
            .ok_or(HrServiceError::RequestNotFound)?;
        tracing::info!(
            request_id = %updated.id,
            status = %updated.status,
            admin_id = %caller.user_id,
            "request status changed"
        );
        Ok(updated)
    }
}

// ── DeleteRequest ────────────────────────────────────────────────────────────

pub struct DeleteRequestUseCase<R: LeaveRequestRepository> {
    pub repo: R,
}

impl<R: LeaveRequestRepository> DeleteRequestUseCase<R> {
    pub async fn execute(
        &self,
        caller: &CallerContext,
        request_id: Uuid,
    ) -> Result<(), HrServiceError> {
        require_admin(caller)?;
        if !self.repo.delete(request_id).await? {
            return Err(HrServiceError::RequestNotFound);
        }
        tracing::info!(request_id = %request_id, admin_id = %caller.user_id, "request deleted");
        Ok(())
    }
}

// ── DeleteApprovedRequests ───────────────────────────────────────────────────

pub struct DeleteApprovedRequestsUseCase<R: LeaveRequestRepository> {
    pub repo: R,
}

impl<R: LeaveRequestRepository> DeleteApprovedRequestsUseCase<R> {
    /// Returns the number of deleted requests.
    pub async fn execute(&self, caller: &CallerContext) -> Result<u64, HrServiceError> {
        require_admin(caller)?;
        let deleted = self.repo.delete_approved().await?;
        tracing::info!(deleted, admin_id = %caller.user_id, "approved requests deleted");
        Ok(deleted)
    }
}

// ── ApprovedExport ───────────────────────────────────────────────────────────

pub struct ApprovedExportUseCase<E: EmployeeRepository, R: LeaveRequestRepository> {
    pub employees: E,
    pub requests: R,
}

impl<E: EmployeeRepository, R: LeaveRequestRepository> ApprovedExportUseCase<E, R> {
    pub async fn execute(&self, caller: &CallerContext) -> Result<Vec<HrFormRow>, HrServiceError> {
        require_admin(caller)?;
        let approved = self.requests.list_approved().await?;

        let mut owner_ids: Vec<Uuid> = approved.iter().map(|r| r.employee_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();
        let owners: HashMap<Uuid, _> = self
            .employees
            .find_by_ids(&owner_ids)
            .await?
            .into_iter()
            .map(|e| (e.id, e))
            .collect();

        Ok(approved
            .iter()
            .map(|r| HrFormRow::new(r, owners.get(&r.employee_id)))
            .collect())
    }
}
