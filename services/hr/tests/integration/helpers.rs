use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, TimeDelta, Utc};
use uuid::Uuid;

use hrdesk_domain::leave::{RequestSource, RequestStatus, RequestType};
use hrdesk_domain::report::{Gender, ReportStatus, RiskLevel, ScanType};
use hrdesk_domain::role::Role;
use hrdesk_domain::team::Visibility;
use hrdesk_hr::domain::repository::{
    EmployeeRepository, LeaveRequestRepository, PasswordHasherPort, ReportRepository,
};
use hrdesk_hr::domain::types::{
    DEFAULT_BRANCH, Employee, LeaveRequest, OutboxEvent, Profile, Report,
};
use hrdesk_hr::error::HrServiceError;
use hrdesk_testing::auth::MockAuth;

// ── MockEmployeeRepo ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockEmployeeRepo {
    pub employees: Arc<Mutex<Vec<Employee>>>,
    pub outbox: Arc<Mutex<Vec<OutboxEvent>>>,
}

impl MockEmployeeRepo {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees: Arc::new(Mutex::new(employees)),
            outbox: Arc::default(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a shared handle to the stored employees for post-execution inspection.
    pub fn employees_handle(&self) -> Arc<Mutex<Vec<Employee>>> {
        Arc::clone(&self.employees)
    }

    pub fn outbox_handle(&self) -> Arc<Mutex<Vec<OutboxEvent>>> {
        Arc::clone(&self.outbox)
    }
}

impl EmployeeRepository for MockEmployeeRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, HrServiceError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Employee>, HrServiceError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }

    async fn list_employees(
        &self,
        visibility: &Visibility,
    ) -> Result<Vec<Employee>, HrServiceError> {
        let mut employees: Vec<Employee> = self
            .employees
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.employee_code.is_some() && visibility.allows(e.title.as_deref()))
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(employees)
    }

    async fn identity_taken(
        &self,
        email: Option<&str>,
        employee_code: Option<&str>,
        fingerprint_code: Option<&str>,
        exclude: Option<Uuid>,
    ) -> Result<bool, HrServiceError> {
        Ok(self.employees.lock().unwrap().iter().any(|e| {
            Some(e.id) != exclude
                && (email.is_some_and(|v| e.email == v)
                    || employee_code.is_some_and(|v| e.employee_code.as_deref() == Some(v))
                    || fingerprint_code.is_some_and(|v| e.fingerprint_code.as_deref() == Some(v)))
        }))
    }

    async fn create_with_outbox(
        &self,
        employee: &Employee,
        event: &OutboxEvent,
    ) -> Result<(), HrServiceError> {
        self.employees.lock().unwrap().push(employee.clone());
        self.outbox.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn update(&self, employee: &Employee) -> Result<(), HrServiceError> {
        let mut employees = self.employees.lock().unwrap();
        if let Some(slot) = employees.iter_mut().find(|e| e.id == employee.id) {
            *slot = employee.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, HrServiceError> {
        let mut employees = self.employees.lock().unwrap();
        let before = employees.len();
        employees.retain(|e| e.id != id);
        Ok(employees.len() < before)
    }
}

// ── MockRequestRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockRequestRepo {
    pub requests: Arc<Mutex<Vec<LeaveRequest>>>,
    /// Inserts for this employee fail, to exercise partial-failure paths.
    pub failing_employee: Option<Uuid>,
    /// Inserts starting on this date fail.
    pub failing_date: Option<NaiveDate>,
}

impl MockRequestRepo {
    pub fn new(requests: Vec<LeaveRequest>) -> Self {
        Self {
            requests: Arc::new(Mutex::new(requests)),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing_for(employee_id: Uuid) -> Self {
        Self {
            failing_employee: Some(employee_id),
            ..Self::default()
        }
    }

    pub fn failing_on(date: NaiveDate) -> Self {
        Self {
            failing_date: Some(date),
            ..Self::default()
        }
    }

    pub fn requests_handle(&self) -> Arc<Mutex<Vec<LeaveRequest>>> {
        Arc::clone(&self.requests)
    }

    fn newest_first(&self, keep: impl Fn(&LeaveRequest) -> bool) -> Vec<LeaveRequest> {
        let mut found: Vec<LeaveRequest> = self
            .requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| keep(r))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }
}

impl LeaveRequestRepository for MockRequestRepo {
    async fn create(&self, request: &LeaveRequest) -> Result<(), HrServiceError> {
        if self.failing_employee == Some(request.employee_id)
            || self.failing_date == Some(request.start_date)
        {
            return Err(HrServiceError::Internal(anyhow::anyhow!("insert rejected")));
        }
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LeaveRequest>, HrServiceError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_by_source(
        &self,
        source: RequestSource,
    ) -> Result<Vec<LeaveRequest>, HrServiceError> {
        Ok(self.newest_first(|r| r.source == source))
    }

    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        limit: u32,
    ) -> Result<Vec<LeaveRequest>, HrServiceError> {
        let mut found = self.newest_first(|r| r.employee_id == employee_id);
        found.truncate(limit as usize);
        Ok(found)
    }

    async fn list_approved_overlapping(
        &self,
        employee_ids: &[Uuid],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LeaveRequest>, HrServiceError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                employee_ids.contains(&r.employee_id)
                    && r.status == RequestStatus::Approved
                    && r.start_date <= to
                    && r.end_date >= from
            })
            .cloned()
            .collect())
    }

    async fn list_approved(&self) -> Result<Vec<LeaveRequest>, HrServiceError> {
        let mut found = self.newest_first(|r| r.status == RequestStatus::Approved);
        found.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(found)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<Option<LeaveRequest>, HrServiceError> {
        let mut requests = self.requests.lock().unwrap();
        Ok(requests.iter_mut().find(|r| r.id == id).map(|r| {
            r.status = status;
            r.updated_at = Utc::now();
            r.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, HrServiceError> {
        let mut requests = self.requests.lock().unwrap();
        let before = requests.len();
        requests.retain(|r| r.id != id);
        Ok(requests.len() < before)
    }

    async fn delete_approved(&self) -> Result<u64, HrServiceError> {
        let mut requests = self.requests.lock().unwrap();
        let before = requests.len();
        requests.retain(|r| r.status != RequestStatus::Approved);
        Ok((before - requests.len()) as u64)
    }
}

// ── MockReportRepo ───────────────────────────────────────────────────────────

/// Shares the employee list so report creation can bump the usage counter.
#[derive(Clone)]
pub struct MockReportRepo {
    pub reports: Arc<Mutex<Vec<Report>>>,
    pub employees: Arc<Mutex<Vec<Employee>>>,
}

impl MockReportRepo {
    pub fn new(employees: &MockEmployeeRepo) -> Self {
        Self {
            reports: Arc::default(),
            employees: employees.employees_handle(),
        }
    }

    pub fn reports_handle(&self) -> Arc<Mutex<Vec<Report>>> {
        Arc::clone(&self.reports)
    }
}

impl ReportRepository for MockReportRepo {
    async fn create(&self, report: &Report) -> Result<(), HrServiceError> {
        self.reports.lock().unwrap().push(report.clone());
        if let Some(owner) = self
            .employees
            .lock()
            .unwrap()
            .iter_mut()
            .find(|e| e.id == report.owner_id)
        {
            owner.profile.platform_usage_count += 1;
        }
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Report>, HrServiceError> {
        let mut found: Vec<Report> = self
            .reports
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Report>, HrServiceError> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id && r.owner_id == owner_id)
            .cloned())
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> Result<bool, HrServiceError> {
        let mut reports = self.reports.lock().unwrap();
        let before = reports.len();
        reports.retain(|r| !(r.id == id && r.owner_id == owner_id));
        Ok(reports.len() < before)
    }
}

// ── MockHasher ───────────────────────────────────────────────────────────────

pub struct MockHasher;

impl PasswordHasherPort for MockHasher {
    fn hash(&self, password: &str) -> Result<String, HrServiceError> {
        Ok(format!("hashed:{password}"))
    }
}

// ── Builders ─────────────────────────────────────────────────────────────────

pub fn test_employee(full_name: &str, code: &str, title: &str) -> Employee {
    let now = Utc::now();
    Employee {
        id: Uuid::now_v7(),
        username: full_name.to_lowercase().replace(' ', "."),
        email: format!("{}@example.com", code.to_lowercase()),
        password_hash: "hashed".into(),
        roles: vec![Role::User],
        active: true,
        full_name: Some(full_name.into()),
        full_name_localized: None,
        employee_code: Some(code.into()),
        fingerprint_code: Some(format!("FP-{code}")),
        job_position: None,
        branch: DEFAULT_BRANCH.into(),
        title: Some(title.into()),
        profile: Profile::default(),
        created_at: now,
        updated_at: now,
    }
}

/// An employee record whose id matches the mock caller.
pub fn employee_for(auth: &MockAuth, full_name: &str, code: &str, title: &str) -> Employee {
    Employee {
        id: auth.user_id,
        roles: auth.roles.clone(),
        ..test_employee(full_name, code, title)
    }
}

/// A request created `age_secs` seconds ago, so ordering tests are deterministic.
pub fn test_request(
    employee: &Employee,
    request_type: RequestType,
    start: NaiveDate,
    end: NaiveDate,
    status: RequestStatus,
    age_secs: i64,
) -> LeaveRequest {
    let created_at = Utc::now() - TimeDelta::seconds(age_secs);
    LeaveRequest {
        id: Uuid::now_v7(),
        employee_id: employee.id,
        employee_name: employee.display_name().to_owned(),
        employee_code: employee.employee_code.clone(),
        request_type,
        start_date: start,
        end_date: end,
        selected_dates: vec![],
        number_of_days: ((end - start).num_days() + 1) as u32,
        reason: String::new(),
        notes: String::new(),
        status,
        source: RequestSource::EmployeeRequest,
        created_at,
        updated_at: created_at,
    }
}

pub fn test_report(owner: &Employee, patient: &str, confidence: f64, status: ReportStatus) -> Report {
    Report {
        id: Uuid::now_v7(),
        owner_id: owner.id,
        patient_name: patient.into(),
        age: 40,
        gender: Gender::Female,
        scan_type: ScanType::Ct,
        clinical_notes: String::new(),
        diagnosis: "Clear".into(),
        confidence,
        status,
        risk_level: RiskLevel::Low,
        details: String::new(),
        recommendations: vec![],
        image_url: String::new(),
        created_at: Utc::now(),
    }
}
