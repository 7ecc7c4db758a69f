use axum::{
    Json,
    extract::{RawQuery, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hrdesk_auth_types::identity::CallerContext;
use hrdesk_domain::leave::{RequestSource, RequestStatus, RequestType};
use hrdesk_domain::pagination::RecentLimit;

use crate::domain::types::{HrFormRow, LeaveRequest};
use crate::error::HrServiceError;
use crate::handlers::extract::{IdPath, JsonBody};
use crate::state::AppState;
use crate::usecase::request::{
    ApprovedExportUseCase, CreateAdminRequestInput, CreateAdminRequestUseCase,
    CreateRequestInput, CreateRequestUseCase, DeleteApprovedRequestsUseCase, DeleteRequestUseCase,
    ListMyRequestsUseCase, ListRequestsUseCase, UpdateRequestStatusUseCase,
};

// ── Shared response shapes ───────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub employee_code: Option<String>,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub selected_dates: Vec<NaiveDate>,
    pub number_of_days: u32,
    pub reason: String,
    pub notes: String,
    pub status: RequestStatus,
    pub source: RequestSource,
    #[serde(serialize_with = "hrdesk_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "hrdesk_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<LeaveRequest> for RequestResponse {
    fn from(r: LeaveRequest) -> Self {
        Self {
            id: r.id,
            employee_id: r.employee_id,
            employee_name: r.employee_name,
            employee_code: r.employee_code,
            request_type: r.request_type,
            start_date: r.start_date,
            end_date: r.end_date,
            selected_dates: r.selected_dates,
            number_of_days: r.number_of_days,
            reason: r.reason,
            notes: r.notes,
            status: r.status,
            source: r.source,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Short form returned by the create endpoints.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRequest {
    pub id: Uuid,
    pub employee_name: String,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub number_of_days: u32,
    pub status: RequestStatus,
    pub source: RequestSource,
    #[serde(serialize_with = "hrdesk_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<LeaveRequest> for CreatedRequest {
    fn from(r: LeaveRequest) -> Self {
        Self {
            id: r.id,
            employee_name: r.employee_name,
            request_type: r.request_type,
            start_date: r.start_date,
            end_date: r.end_date,
            number_of_days: r.number_of_days,
            status: r.status,
            source: r.source,
            created_at: r.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct CreatedRequestResponse {
    pub message: &'static str,
    pub request: CreatedRequest,
}

// ── POST /requests ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    #[serde(rename = "type")]
    pub request_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub number_of_days: Option<i64>,
    #[serde(default)]
    pub selected_dates: Vec<String>,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
}

pub async fn create_request(
    caller: CallerContext,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateRequestBody>,
) -> Result<(StatusCode, Json<CreatedRequestResponse>), HrServiceError> {
    let usecase = CreateRequestUseCase {
        employees: state.employee_repo(),
        requests: state.request_repo(),
        work_timezone: state.work_timezone,
    };
    let request = usecase
        .execute(
            &caller,
            CreateRequestInput {
                request_type: body.request_type,
                start_date: body.start_date,
                end_date: body.end_date,
                number_of_days: body.number_of_days,
                selected_dates: body.selected_dates,
                reason: body.reason,
                notes: body.notes,
                employee_id: body.employee_id,
                employee_name: body.employee_name,
                status: body.status,
                source: body.source,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedRequestResponse {
            message: "Request created successfully",
            request: request.into(),
        }),
    ))
}

// ── POST /requests/admin ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequestBody {
    pub employee_id: Option<String>,
    #[serde(rename = "type")]
    pub request_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub number_of_days: Option<i64>,
}

pub async fn create_admin_request(
    caller: CallerContext,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateAdminRequestBody>,
) -> Result<(StatusCode, Json<CreatedRequestResponse>), HrServiceError> {
    let usecase = CreateAdminRequestUseCase {
        employees: state.employee_repo(),
        requests: state.request_repo(),
        work_timezone: state.work_timezone,
    };
    let request = usecase
        .execute(
            &caller,
            CreateAdminRequestInput {
                employee_id: body.employee_id,
                request_type: body.request_type,
                start_date: body.start_date,
                end_date: body.end_date,
                number_of_days: body.number_of_days,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedRequestResponse {
            message: "Admin request created successfully",
            request: request.into(),
        }),
    ))
}

// ── GET /requests ────────────────────────────────────────────────────────────

pub async fn list_requests(
    caller: CallerContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<RequestResponse>>, HrServiceError> {
    let usecase = ListRequestsUseCase {
        repo: state.request_repo(),
    };
    let requests = usecase.execute(&caller).await?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

// ── GET /requests/my ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct MyRequestsQuery {
    pub limit: Option<u32>,
}

pub async fn list_my_requests(
    caller: CallerContext,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<RequestResponse>>, HrServiceError> {
    let query: MyRequestsQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| HrServiceError::MissingData)?
        .unwrap_or_default();
    let usecase = ListMyRequestsUseCase {
        employees: state.employee_repo(),
        requests: state.request_repo(),
    };
    let requests = usecase
        .execute(&caller, RecentLimit::from_raw(query.limit))
        .await?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

// ── PATCH /requests/{id} ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateStatusBody {
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct UpdateStatusResponse {
    pub message: String,
    pub request: RequestResponse,
}

pub async fn update_request_status(
    caller: CallerContext,
    State(state): State<AppState>,
    IdPath(id): IdPath<Uuid>,
    JsonBody(body): JsonBody<UpdateStatusBody>,
) -> Result<Json<UpdateStatusResponse>, HrServiceError> {
    let usecase = UpdateRequestStatusUseCase {
        repo: state.request_repo(),
    };
    let request = usecase
        .execute(&caller, id, body.status.as_deref())
        .await?;
    Ok(Json(UpdateStatusResponse {
        message: format!(
            "Request {} successfully",
            request.status.as_str().to_lowercase()
        ),
        request: request.into(),
    }))
}

// ── DELETE /requests/{id} ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DeletedRequestResponse {
    pub message: &'static str,
    pub id: Uuid,
}

pub async fn delete_request(
    caller: CallerContext,
    State(state): State<AppState>,
    IdPath(id): IdPath<Uuid>,
) -> Result<Json<DeletedRequestResponse>, HrServiceError> {
    let usecase = DeleteRequestUseCase {
        repo: state.request_repo(),
    };
    usecase.execute(&caller, id).await?;
    Ok(Json(DeletedRequestResponse {
        message: "Request deleted successfully",
        id,
    }))
}

// ── DELETE /requests/all ─────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    pub message: &'static str,
    pub deleted_count: u64,
}

pub async fn delete_approved_requests(
    caller: CallerContext,
    State(state): State<AppState>,
) -> Result<Json<BulkDeleteResponse>, HrServiceError> {
    let usecase = DeleteApprovedRequestsUseCase {
        repo: state.request_repo(),
    };
    let deleted_count = usecase.execute(&caller).await?;
    Ok(Json(BulkDeleteResponse {
        message: "All approved requests deleted successfully",
        deleted_count,
    }))
}

// ── GET /requests/approved ───────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HrFormRowResponse {
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

impl From<HrFormRow> for HrFormRowResponse {
    fn from(row: HrFormRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            fingerprint: row.fingerprint,
            employee_name: row.employee_name,
            job_position: row.job_position,
            branch: row.branch,
            time_off_type: row.time_off_type,
            request_type: row.request_type,
            purpose: row.purpose,
            start_date: row.start_date,
            end_date: row.end_date,
            number_of_days: row.number_of_days,
        }
    }
}

pub async fn export_approved_requests(
    caller: CallerContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<HrFormRowResponse>>, HrServiceError> {
    let usecase = ApprovedExportUseCase {
        employees: state.employee_repo(),
        requests: state.request_repo(),
    };
    let rows = usecase.execute(&caller).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
