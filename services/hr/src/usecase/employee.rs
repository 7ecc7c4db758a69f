use std::sync::Arc;

use chrono::Utc;
use rand::RngExt;
use serde_json::json;
use uuid::Uuid;

use hrdesk_auth_types::identity::CallerContext;
use hrdesk_domain::role::Role;
use hrdesk_domain::team::{TeamDirectory, Visibility};

use crate::domain::repository::{EmployeeRepository, PasswordHasherPort};
use crate::domain::types::{
    DEFAULT_BRANCH, Employee, GENERATED_PASSWORD_LEN, OutboxEvent, Profile, non_empty,
};
use crate::error::HrServiceError;
use crate::usecase::require_admin;

pub const CREDENTIALS_ISSUED_EVENT: &str = "employee_credentials_issued";

/// Charset for generated initial passwords. Look-alike characters are left out.
const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789!@#$%";

fn generate_password() -> String {
    let mut rng = rand::rng();
    (0..GENERATED_PASSWORD_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Trim and drop empty strings, so `""` clears an optional column.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// A record with an employee code must carry a full name.
fn check_employee_invariant(employee: &Employee) -> Result<(), HrServiceError> {
    if employee.employee_code.is_some() && non_empty(employee.full_name.as_deref()).is_none() {
        return Err(HrServiceError::MissingData);
    }
    Ok(())
}

// ── AddEmployee ──────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct AddEmployeeInput {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub full_name_localized: Option<String>,
    pub employee_code: Option<String>,
    pub fingerprint_code: Option<String>,
    pub job_position: Option<String>,
    pub branch: Option<String>,
    pub title: Option<String>,
}

pub struct AddEmployeeUseCase<R: EmployeeRepository, H: PasswordHasherPort> {
    pub repo: R,
    pub hasher: H,
}

impl<R: EmployeeRepository, H: PasswordHasherPort> AddEmployeeUseCase<R, H> {
    /// Create an employee account with a generated password. The plaintext
    /// password only leaves the service through the outbox event written in
    /// the same transaction as the account.
    pub async fn execute(
        &self,
        caller: &CallerContext,
        input: AddEmployeeInput,
    ) -> Result<Employee, HrServiceError> {
        require_admin(caller)?;
        let email = clean(input.email).ok_or(HrServiceError::MissingData)?;
        let full_name = clean(input.full_name);
        let employee_code = clean(input.employee_code);
        let fingerprint_code = clean(input.fingerprint_code);

        let now = Utc::now();
        let employee = Employee {
            id: Uuid::now_v7(),
            username: full_name.clone().unwrap_or_else(|| email.clone()),
            email,
            password_hash: String::new(),
            roles: vec![Role::User],
            active: true,
            full_name,
            full_name_localized: clean(input.full_name_localized),
            employee_code,
            fingerprint_code,
            job_position: clean(input.job_position),
            branch: clean(input.branch).unwrap_or_else(|| DEFAULT_BRANCH.to_owned()),
            title: clean(input.title),
            profile: Profile::default(),
            created_at: now,
            updated_at: now,
        };
        check_employee_invariant(&employee)?;

        if self
            .repo
            .identity_taken(
                Some(&employee.email),
                employee.employee_code.as_deref(),
                employee.fingerprint_code.as_deref(),
                None,
            )
            .await?
        {
            return Err(HrServiceError::EmployeeAlreadyExists);
        }

        let password = generate_password();
        let employee = Employee {
            password_hash: self.hasher.hash(&password)?,
            ..employee
        };
        let event = OutboxEvent {
            id: Uuid::now_v7(),
            kind: CREDENTIALS_ISSUED_EVENT.to_owned(),
            payload: json!({
                "email": employee.email,
                "fullName": employee.display_name(),
                "employeeCode": employee.employee_code,
                "password": password,
            }),
            idempotency_key: format!("{CREDENTIALS_ISSUED_EVENT}:{}", employee.id),
        };
        self.repo.create_with_outbox(&employee, &event).await?;

        tracing::info!(
            admin_id = %caller.user_id,
            employee_id = %employee.id,
            "employee added"
        );
        Ok(employee)
    }
}

// ── ListEmployees ────────────────────────────────────────────────────────────

pub struct ListEmployeesUseCase<R: EmployeeRepository> {
    pub repo: R,
    pub teams: Arc<TeamDirectory>,
}

impl<R: EmployeeRepository> ListEmployeesUseCase<R> {
    /// Employees visible to the caller. Callers who may see nobody get an
    /// empty list rather than an error.
    pub async fn execute(&self, caller: &CallerContext) -> Result<Vec<Employee>, HrServiceError> {
        let visibility = if caller.is_admin() {
            Visibility::All
        } else {
            let me = self
                .repo
                .find_by_id(caller.user_id)
                .await?
                .ok_or(HrServiceError::EmployeeNotFound)?;
            self.teams.visibility(false, me.title.as_deref())
        };
        if visibility.is_nothing() {
            return Ok(Vec::new());
        }
        self.repo.list_employees(&visibility).await
    }
}

// ── GetEmployee ──────────────────────────────────────────────────────────────

pub struct GetEmployeeUseCase<R: EmployeeRepository> {
    pub repo: R,
}

impl<R: EmployeeRepository> GetEmployeeUseCase<R> {
    pub async fn execute(
        &self,
        caller: &CallerContext,
        id: Uuid,
    ) -> Result<Employee, HrServiceError> {
        require_admin(caller)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(HrServiceError::EmployeeNotFound)
    }
}

// ── UpdateEmployee ───────────────────────────────────────────────────────────

/// Partial edit. `None` leaves a field untouched; an empty string clears an
/// optional field.
#[derive(Debug, Default)]
pub struct UpdateEmployeeInput {
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

pub struct UpdateEmployeeUseCase<R: EmployeeRepository> {
    pub repo: R,
}

impl<R: EmployeeRepository> UpdateEmployeeUseCase<R> {
    pub async fn execute(
        &self,
        caller: &CallerContext,
        id: Uuid,
        input: UpdateEmployeeInput,
    ) -> Result<Employee, HrServiceError> {
        require_admin(caller)?;
        let mut employee = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(HrServiceError::EmployeeNotFound)?;

        let email_changed = input.email.is_some();
        let code_changed = input.employee_code.is_some();
        let fingerprint_changed = input.fingerprint_code.is_some();

        if let Some(email) = input.email {
            employee.email = clean(Some(email)).ok_or(HrServiceError::MissingData)?;
        }
        if input.full_name.is_some() {
            employee.full_name = clean(input.full_name);
        }
        if input.full_name_localized.is_some() {
            employee.full_name_localized = clean(input.full_name_localized);
        }
        if code_changed {
            employee.employee_code = clean(input.employee_code);
        }
        if fingerprint_changed {
            employee.fingerprint_code = clean(input.fingerprint_code);
        }
        if input.job_position.is_some() {
            employee.job_position = clean(input.job_position);
        }
        if let Some(branch) = clean(input.branch) {
            employee.branch = branch;
        }
        if input.title.is_some() {
            employee.title = clean(input.title);
        }
        if let Some(active) = input.active {
            employee.active = active;
        }
        check_employee_invariant(&employee)?;

        if (email_changed || code_changed || fingerprint_changed)
            && self
                .repo
                .identity_taken(
                    email_changed.then_some(employee.email.as_str()),
                    employee.employee_code.as_deref().filter(|_| code_changed),
                    employee
                        .fingerprint_code
                        .as_deref()
                        .filter(|_| fingerprint_changed),
                    Some(employee.id),
                )
                .await?
        {
            return Err(HrServiceError::EmployeeAlreadyExists);
        }

        employee.updated_at = Utc::now();
        self.repo.update(&employee).await?;
        Ok(employee)
    }
}

// ── DeleteEmployee ───────────────────────────────────────────────────────────

pub struct DeleteEmployeeUseCase<R: EmployeeRepository> {
    pub repo: R,
}

impl<R: EmployeeRepository> DeleteEmployeeUseCase<R> {
    /// Hard delete. The employee's requests stay behind with their name and
    /// code snapshots.
    pub async fn execute(&self, caller: &CallerContext, id: Uuid) -> Result<(), HrServiceError> {
        require_admin(caller)?;
        if !self.repo.delete(id).await? {
            return Err(HrServiceError::EmployeeNotFound);
        }
        tracing::info!(admin_id = %caller.user_id, employee_id = %id, "employee deleted");
        Ok(())
    }
}
