use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use hrdesk_auth_types::identity::CallerContext;
use hrdesk_domain::leave::RequestType;

use crate::domain::schedule::{DayMark, WeeklyGrid};
use crate::error::HrServiceError;
use crate::state::AppState;
use crate::usecase::schedule::{MyWeekUseCase, WeeklyGridUseCase};

// ── GET /requests/week ───────────────────────────────────────────────────────

/// `status` repeats the request type; existing clients read it that way.
#[derive(Serialize)]
pub struct DayMarkResponse {
    pub date: NaiveDate,
    pub status: RequestType,
    #[serde(rename = "type")]
    pub request_type: RequestType,
}

impl From<DayMark> for DayMarkResponse {
    fn from(mark: DayMark) -> Self {
        Self {
            date: mark.date,
            status: mark.request_type,
            request_type: mark.request_type,
        }
    }
}

pub async fn my_week(
    caller: CallerContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<DayMarkResponse>>, HrServiceError> {
    let usecase = MyWeekUseCase {
        employees: state.employee_repo(),
        requests: state.request_repo(),
    };
    let days = usecase.execute(&caller, state.today()).await?;
    Ok(Json(days.into_iter().map(Into::into).collect()))
}

// ── GET /requests/weekly-wfh ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekDayResponse {
    pub date: NaiveDate,
    pub day_name: &'static str,
    pub day_short: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCellResponse {
    pub date: NaiveDate,
    pub day_name: &'static str,
    pub day_short: &'static str,
    #[serde(rename = "isWFH")]
    pub is_wfh: bool,
    #[serde(rename = "type")]
    pub request_type: Option<RequestType>,
    pub purpose: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWeekResponse {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub employee_code: String,
    pub week_schedule: Vec<ScheduleCellResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGridResponse {
    pub week_range: WeekRange,
    pub week_days: Vec<WeekDayResponse>,
    pub employees: Vec<EmployeeWeekResponse>,
}

impl From<WeeklyGrid> for WeeklyGridResponse {
    fn from(grid: WeeklyGrid) -> Self {
        Self {
            week_range: WeekRange {
                start: grid.week.start(),
                end: grid.week.end(),
            },
            week_days: grid
                .days
                .iter()
                .map(|d| WeekDayResponse {
                    date: d.date,
                    day_name: d.day_name,
                    day_short: d.day_short,
                })
                .collect(),
            employees: grid
                .employees
                .into_iter()
                .map(|e| EmployeeWeekResponse {
                    employee_id: e.employee_id,
                    employee_name: e.employee_name,
                    employee_code: e.employee_code,
                    week_schedule: e
                        .cells
                        .into_iter()
                        .map(|cell| {
                            let is_wfh = cell.mark.is_some();
                            let (request_type, purpose) = match cell.mark {
                                Some(mark) => (Some(mark.request_type), Some(mark.purpose)),
                                None => (None, None),
                            };
                            ScheduleCellResponse {
                                date: cell.day.date,
                                day_name: cell.day.day_name,
                                day_short: cell.day.day_short,
                                is_wfh,
                                request_type,
                                purpose,
                            }
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

pub async fn weekly_grid(
    caller: CallerContext,
    State(state): State<AppState>,
) -> Result<Json<WeeklyGridResponse>, HrServiceError> {
    let usecase = WeeklyGridUseCase {
        employees: state.employee_repo(),
        requests: state.request_repo(),
        teams: state.teams.clone(),
    };
    let grid = usecase.execute(&caller, state.today()).await?;
    Ok(Json(grid.into()))
}
