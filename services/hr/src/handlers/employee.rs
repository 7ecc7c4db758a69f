use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hrdesk_auth_types::identity::CallerContext;

use crate::domain::types::Employee;
use crate::error::HrServiceError;
use crate::handlers::extract::{IdPath, JsonBody};
use crate::state::AppState;
use crate::usecase::employee::{
    AddEmployeeInput, AddEmployeeUseCase, DeleteEmployeeUseCase, GetEmployeeUseCase,
    ListEmployeesUseCase, UpdateEmployeeInput, UpdateEmployeeUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub full_name_localized: Option<String>,
    pub employee_code: Option<String>,
    pub fingerprint_code: Option<String>,
    pub job_position: Option<String>,
    pub branch: String,
    pub title: Option<String>,
    pub active: bool,
    #[serde(serialize_with = "hrdesk_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            username: e.username,
            email: e.email,
            full_name: e.full_name,
            full_name_localized: e.full_name_localized,
            employee_code: e.employee_code,
            fingerprint_code: e.fingerprint_code,
            job_position: e.job_position,
            branch: e.branch,
            title: e.title,
            active: e.active,
            created_at: e.created_at,
        }
    }
}

// ── POST /employees ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEmployeeBody {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub full_name_localized: Option<String>,
    pub employee_code: Option<String>,
    pub fingerprint_code: Option<String>,
    pub job_position: Option<String>,
    pub branch: Option<String>,
    pub title: Option<String>,
}

#[derive(Serialize)]
pub struct AddEmployeeResponse {
    pub message: &'static str,
    pub employee: EmployeeResponse,
}

pub async fn add_employee(
    caller: CallerContext,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AddEmployeeBody>,
) -> Result<(StatusCode, Json<AddEmployeeResponse>), HrServiceError> {
    let usecase = AddEmployeeUseCase {
        repo: state.employee_repo(),
        hasher: state.password_hasher(),
    };
    let employee = usecase
        .execute(
            &caller,
            AddEmployeeInput {
                email: body.email,
                full_name: body.full_name,
                full_name_localized: body.full_name_localized,
                employee_code: body.employee_code,
                fingerprint_code: body.fingerprint_code,
                job_position: body.job_position,
                branch: body.branch,
                title: body.title,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AddEmployeeResponse {
            message: "Employee created successfully",
            employee: employee.into(),
        }),
    ))
}

// ── GET /employees ───────────────────────────────────────────────────────────

pub async fn list_employees(
    caller: CallerContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeResponse>>, HrServiceError> {
    let usecase = ListEmployeesUseCase {
        repo: state.employee_repo(),
        teams: state.teams.clone(),
    };
    let employees = usecase.execute(&caller).await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

// ── GET /employees/{id} ──────────────────────────────────────────────────────

pub async fn get_employee(
    caller: CallerContext,
    State(state): State<AppState>,
    IdPath(id): IdPath<Uuid>,
) -> Result<Json<EmployeeResponse>, HrServiceError> {
    let usecase = GetEmployeeUseCase {
        repo: state.employee_repo(),
    };
    let employee = usecase.execute(&caller, id).await?;
    Ok(Json(employee.into()))
}

// ── PATCH /employees/{id} ────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeBody {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub full_name_localized: Option<String>,
    pub employee_code: Option<String>,
    pub fingerprint_code: Option<String>,
    pub job_position: Option<String>,
    pub branch: Option<String>,
    pub title: Option<String>,
    pub active: Option<bool>,
}

pub async fn update_employee(
    caller: CallerContext,
    State(state): State<AppState>,
    IdPath(id): IdPath<Uuid>,
    JsonBody(body): JsonBody<UpdateEmployeeBody>,
) -> Result<Json<EmployeeResponse>, HrServiceError> {
    let usecase = UpdateEmployeeUseCase {
        repo: state.employee_repo(),
    };
    let employee = usecase
        .execute(
            &caller,
            id,
            UpdateEmployeeInput {
                email: body.email,
                full_name: body.full_name,
                full_name_localized: body.full_name_localized,
                employee_code: body.employee_code,
                fingerprint_code: body.fingerprint_code,
                job_position: body.job_position,
                branch: body.branch,
                title: body.title,
                active: body.active,
            },
        )
        .await?;
    Ok(Json(employee.into()))
}

// ── DELETE /employees/{id} ───────────────────────────────────────────────────

pub async fn delete_employee(
    caller: CallerContext,
    State(state): State<AppState>,
    IdPath(id): IdPath<Uuid>,
) -> Result<StatusCode, HrServiceError> {
    let usecase = DeleteEmployeeUseCase {
        repo: state.employee_repo(),
    };
    usecase.execute(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
