use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hrdesk_auth_types::identity::CallerContext;

use crate::error::HrServiceError;
use crate::handlers::extract::JsonBody;
use crate::state::AppState;
use crate::usecase::random_wfh::{Assignment, RandomWfhInput, RandomWfhUseCase};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomWfhBody {
    #[serde(default)]
    pub selected_employee_ids: Vec<String>,
    pub number_of_days_per_employee: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub employee_code: Option<String>,
    pub date: NaiveDate,
    pub request_id: Uuid,
}

impl From<Assignment> for AssignmentResponse {
    fn from(a: Assignment) -> Self {
        Self {
            employee_id: a.employee_id,
            employee_name: a.employee_name,
            employee_code: a.employee_code,
            date: a.date,
            request_id: a.request_id,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomWfhResponse {
    pub message: &'static str,
    pub assignments: Vec<AssignmentResponse>,
    pub total_created: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

pub async fn assign_random_wfh(
    caller: CallerContext,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RandomWfhBody>,
) -> Result<Json<RandomWfhResponse>, HrServiceError> {
    let usecase = RandomWfhUseCase {
        employees: state.employee_repo(),
        requests: state.request_repo(),
    };
    let outcome = usecase
        .execute(
            &caller,
            RandomWfhInput {
                selected_employee_ids: body.selected_employee_ids,
                number_of_days_per_employee: body.number_of_days_per_employee,
            },
            state.today(),
        )
        .await?;
    Ok(Json(RandomWfhResponse {
        message: "Random WFH assignments created successfully",
        total_created: outcome.assignments.len(),
        assignments: outcome.assignments.into_iter().map(Into::into).collect(),
        errors: (!outcome.errors.is_empty()).then_some(outcome.errors),
    }))
}
