use std::sync::Arc;

use chrono::NaiveDate;

use hrdesk_auth_types::identity::CallerContext;
use hrdesk_domain::team::TeamDirectory;
use hrdesk_domain::week::WeekWindow;

use crate::domain::repository::{EmployeeRepository, LeaveRequestRepository};
use crate::domain::schedule::{DayMark, WeeklyGrid, build_weekly_grid, my_week_days};
use crate::error::HrServiceError;

// ── MyWeek ───────────────────────────────────────────────────────────────────

pub struct MyWeekUseCase<E: EmployeeRepository, R: LeaveRequestRepository> {
    pub employees: E,
    pub requests: R,
}

impl<E: EmployeeRepository, R: LeaveRequestRepository> MyWeekUseCase<E, R> {
    /// The caller's approved WFH and vacation days in the week containing `today`.
    pub async fn execute(
        &self,
        caller: &CallerContext,
        today: NaiveDate,
    ) -> Result<Vec<DayMark>, HrServiceError> {
        let me = self
            .employees
            .find_by_id(caller.user_id)
            .await?
            .ok_or(HrServiceError::EmployeeNotFound)?;
        let week = WeekWindow::containing(today);
        let requests = self
            .requests
            .list_approved_overlapping(&[me.id], week.start(), week.end())
            .await?;
        Ok(my_week_days(&requests, &week))
    }
}

// ── WeeklyGrid ───────────────────────────────────────────────────────────────

pub struct WeeklyGridUseCase<E: EmployeeRepository, R: LeaveRequestRepository> {
    pub employees: E,
    pub requests: R,
    pub teams: Arc<TeamDirectory>,
}

impl<E: EmployeeRepository, R: LeaveRequestRepository> WeeklyGridUseCase<E, R> {
    /// Grid for the week containing `today`, limited to the employees the
    /// caller may see. Callers who are neither admin nor a recognized lead are
    /// refused.
    pub async fn execute(
        &self,
        caller: &CallerContext,
        today: NaiveDate,
    ) -> Result<WeeklyGrid, HrServiceError> {
        let me = self
            .employees
            .find_by_id(caller.user_id)
            .await?
            .ok_or(HrServiceError::EmployeeNotFound)?;
        let visibility = self
            .teams
            .visibility(caller.is_admin(), me.title.as_deref());
        if visibility.is_nothing() {
            return Err(HrServiceError::Forbidden);
        }

        let week = WeekWindow::containing(today);
        let members = self.employees.list_employees(&visibility).await?;
        let member_ids: Vec<_> = members.iter().map(|e| e.id).collect();
        let requests = if member_ids.is_empty() {
            Vec::new()
        } else {
            self.requests
                .list_approved_overlapping(&member_ids, week.start(), week.end())
                .await?
        };
        Ok(build_weekly_grid(week, &members, &requests))
    }
}
