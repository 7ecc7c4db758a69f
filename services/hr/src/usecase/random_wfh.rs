use chrono::{NaiveDate, Utc};
use rand::RngExt;
use uuid::Uuid;

use hrdesk_auth_types::identity::CallerContext;
use hrdesk_domain::leave::{RequestSource, RequestStatus, RequestType};
use hrdesk_domain::week::WeekWindow;

use crate::domain::repository::{EmployeeRepository, LeaveRequestRepository};
use crate::domain::types::LeaveRequest;
use crate::error::HrServiceError;
use crate::usecase::require_admin;

pub const RANDOM_WFH_NOTES: &str = "Random WFH assignment by admin";

/// Upper bound accepted for `numberOfDaysPerEmployee`. Only six days are
/// assignable (Friday is excluded), so seven yields six.
pub const MAX_DAYS_PER_EMPLOYEE: i64 = 7;

/// Pick `n` distinct days from `candidates` uniformly without replacement,
/// returned in calendar order. Asking for more than available returns all.
pub fn pick_days<R: RngExt>(rng: &mut R, candidates: &[NaiveDate], n: usize) -> Vec<NaiveDate> {
    let mut pool = candidates.to_vec();
    let mut picked = Vec::with_capacity(n.min(pool.len()));
    while picked.len() < n && !pool.is_empty() {
        let i = rng.random_range(0..pool.len());
        picked.push(pool.remove(i));
    }
    picked.sort_unstable();
    picked
}

#[derive(Debug, Default)]
pub struct RandomWfhInput {
    pub selected_employee_ids: Vec<String>,
    pub number_of_days_per_employee: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct Assignment {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub employee_code: Option<String>,
    pub date: NaiveDate,
    pub request_id: Uuid,
}

#[derive(Debug, Default)]
pub struct RandomWfhOutcome {
    pub assignments: Vec<Assignment>,
    /// One human-readable line per unknown employee or failed day.
    pub errors: Vec<String>,
}

pub struct RandomWfhUseCase<E: EmployeeRepository, R: LeaveRequestRepository> {
    pub employees: E,
    pub requests: R,
}

impl<E: EmployeeRepository, R: LeaveRequestRepository> RandomWfhUseCase<E, R> {
    /// Assign random approved WFH days in the week containing `today`.
    ///
    /// Employees are processed one by one. A failed lookup or insert is
    /// recorded as an error line and processing moves on to the next day or
    /// employee; days already created are kept.
    pub async fn execute(
        &self,
        caller: &CallerContext,
        input: RandomWfhInput,
        today: NaiveDate,
    ) -> Result<RandomWfhOutcome, HrServiceError> {
        require_admin(caller)?;
        if input.selected_employee_ids.is_empty() {
            return Err(HrServiceError::NoEmployeesSelected);
        }
        let per_employee = input
            .number_of_days_per_employee
            .filter(|n| (1..=MAX_DAYS_PER_EMPLOYEE).contains(n))
            .ok_or(HrServiceError::InvalidNumberOfDays)? as usize;

        let candidates = WeekWindow::containing(today).assignable_days();
        let mut outcome = RandomWfhOutcome::default();

        for raw_id in &input.selected_employee_ids {
            let employee = match raw_id.parse::<Uuid>() {
                Ok(id) => self.employees.find_by_id(id).await,
                Err(_) => Ok(None),
            };
            let employee = match employee {
                Ok(Some(employee)) => employee,
                Ok(None) => {
                    outcome
                        .errors
                        .push(format!("Employee with ID {raw_id} not found"));
                    continue;
                }
                Err(e) => {
                    tracing::warn!(employee_id = %raw_id, error = ?e, "random WFH lookup failed");
                    outcome
                        .errors
                        .push(format!("Failed to create WFH for employee {raw_id}: {e}"));
                    continue;
                }
            };

            let days = pick_days(&mut rand::rng(), &candidates, per_employee);
            for date in days {
                let now = Utc::now();
                let request = LeaveRequest {
                    id: Uuid::now_v7(),
                    employee_id: employee.id,
                    employee_name: employee.display_name().to_owned(),
                    employee_code: employee.employee_code.clone(),
                    request_type: RequestType::Wfh,
                    start_date: date,
                    end_date: date,
                    selected_dates: vec![],
                    number_of_days: 1,
                    reason: String::new(),
                    notes: RANDOM_WFH_NOTES.to_owned(),
                    status: RequestStatus::Approved,
                    source: RequestSource::AdminDirect,
                    created_at: now,
                    updated_at: now,
                };
                if let Err(e) = self.requests.create(&request).await {
                    tracing::warn!(employee_id = %employee.id, %date, error = ?e, "random WFH insert failed");
                    outcome
                        .errors
                        .push(format!("Failed to create WFH for employee {raw_id} on {date}: {e}"));
                    continue;
                }
                outcome.assignments.push(Assignment {
                    employee_id: employee.id,
                    employee_name: request.employee_name,
                    employee_code: request.employee_code,
                    date,
                    request_id: request.id,
                });
            }
        }

        tracing::info!(
            admin_id = %caller.user_id,
            employees = input.selected_employee_ids.len(),
            created = outcome.assignments.len(),
            failed = outcome.errors.len(),
            "random WFH assignment finished"
        );
        Ok(outcome)
    }
}
