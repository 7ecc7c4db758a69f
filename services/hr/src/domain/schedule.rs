//! Projection of approved requests onto the Sunday-Saturday week grid.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use uuid::Uuid;

use hrdesk_domain::leave::{RequestStatus, RequestType};
use hrdesk_domain::week::{WeekDay, WeekWindow};

use crate::domain::types::{Employee, LeaveRequest, non_empty};

/// Days of `request` that fall inside `week`.
///
/// Explicit selected dates win over the start-end span. Selected dates are
/// returned in submission order.
pub fn days_in_week(request: &LeaveRequest, week: &WeekWindow) -> Vec<NaiveDate> {
    if request.selected_dates.is_empty() {
        week.clip(request.start_date, request.end_date)
    } else {
        request
            .selected_dates
            .iter()
            .copied()
            .filter(|d| week.contains(*d))
            .collect()
    }
}

/// A marked cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleMark {
    pub request_id: Uuid,
    pub request_type: RequestType,
    pub purpose: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleCell {
    pub day: WeekDay,
    pub mark: Option<ScheduleMark>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeWeek {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub employee_code: String,
    pub cells: Vec<ScheduleCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyGrid {
    pub week: WeekWindow,
    pub days: [WeekDay; 7],
    pub employees: Vec<EmployeeWeek>,
}

/// Build the weekly grid for `requests`.
///
/// Only approved requests count. Requests are applied in (employee name,
/// creation time, id) order, so when two requests cover the same employee-day
/// the later one wins. Employees with no marked day are left out. `employees`
/// supplies current names and codes; a request whose owner is missing keeps
/// its snapshots.
pub fn build_weekly_grid(
    week: WeekWindow,
    employees: &[Employee],
    requests: &[LeaveRequest],
) -> WeeklyGrid {
    let by_id: HashMap<Uuid, &Employee> = employees.iter().map(|e| (e.id, e)).collect();

    let identity = |r: &LeaveRequest| -> (String, String) {
        match by_id.get(&r.employee_id) {
            Some(e) => (
                non_empty(e.full_name.as_deref())
                    .unwrap_or(r.employee_name.as_str())
                    .to_owned(),
                e.employee_code
                    .clone()
                    .or_else(|| r.employee_code.clone())
                    .unwrap_or_default(),
            ),
            None => (
                non_empty(Some(r.employee_name.as_str()))
                    .unwrap_or("Unknown")
                    .to_owned(),
                r.employee_code.clone().unwrap_or_default(),
            ),
        }
    };

    let mut ordered: Vec<(String, String, &LeaveRequest)> = requests
        .iter()
        .filter(|r| r.status == RequestStatus::Approved)
        .map(|r| {
            let (name, code) = identity(r);
            (name, code, r)
        })
        .collect();
    ordered.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then(a.2.created_at.cmp(&b.2.created_at))
            .then(a.2.id.cmp(&b.2.id))
    });

    // Keyed by (name, employee id) so the output comes out name-sorted.
    let mut rows: BTreeMap<(String, Uuid), (String, BTreeMap<NaiveDate, ScheduleMark>)> =
        BTreeMap::new();
    for (name, code, request) in ordered {
        let days = days_in_week(request, &week);
        if days.is_empty() {
            continue;
        }
        let (_, marks) = rows
            .entry((name, request.employee_id))
            .or_insert_with(|| (code, BTreeMap::new()));
        for day in days {
            marks.insert(
                day,
                ScheduleMark {
                    request_id: request.id,
                    request_type: request.request_type,
                    purpose: request.purpose().to_owned(),
                },
            );
        }
    }

    let days = week.days();
    let employees = rows
        .into_iter()
        .map(|((employee_name, employee_id), (employee_code, mut marks))| EmployeeWeek {
            employee_id,
            employee_name,
            employee_code,
            cells: days
                .iter()
                .map(|day| ScheduleCell {
                    day: *day,
                    mark: marks.remove(&day.date),
                })
                .collect(),
        })
        .collect();

    WeeklyGrid {
        week,
        days,
        employees,
    }
}

/// One day of the caller's own week view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMark {
    pub date: NaiveDate,
    pub request_type: RequestType,
}

/// The caller's approved WFH and vacation days inside `week`, in request order.
pub fn my_week_days(requests: &[LeaveRequest], week: &WeekWindow) -> Vec<DayMark> {
    requests
        .iter()
        .filter(|r| r.status == RequestStatus::Approved)
        .filter(|r| matches!(r.request_type, RequestType::Wfh | RequestType::Vacation))
        .flat_map(|r| {
            days_in_week(r, week).into_iter().map(|date| DayMark {
                date,
                request_type: r.request_type,
            })
        })
        .collect()
}
