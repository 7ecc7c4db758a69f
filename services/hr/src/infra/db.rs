use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, IntoActiveModel as _, QueryFilter, QueryOrder,
    QuerySelect, SqlErr, TransactionError, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use hrdesk_domain::leave::{RequestSource, RequestStatus};
use hrdesk_domain::role::Role;
use hrdesk_domain::team::Visibility;
use hrdesk_hr_schema::{outbox_events, reports, request_dates, requests, users};

use crate::domain::repository::{EmployeeRepository, LeaveRequestRepository, ReportRepository};
use crate::domain::types::{Employee, LeaveRequest, OutboxEvent, Profile, Report};
use crate::error::HrServiceError;

/// Unique-index violations on `users` surface as a conflict; anything else is internal.
fn conflict_or_internal(err: DbErr, context: &'static str) -> HrServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => HrServiceError::EmployeeAlreadyExists,
        _ => HrServiceError::Internal(anyhow::Error::new(err).context(context)),
    }
}

// ── Employee repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEmployeeRepository {
    pub db: DatabaseConnection,
}

impl EmployeeRepository for DbEmployeeRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, HrServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find employee by id")?;
        Ok(model.map(employee_from_model))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Employee>, HrServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find employees by ids")?;
        Ok(models.into_iter().map(employee_from_model).collect())
    }

    async fn list_employees(
        &self,
        visibility: &Visibility,
    ) -> Result<Vec<Employee>, HrServiceError> {
        let mut query = users::Entity::find().filter(users::Column::EmployeeCode.is_not_null());
        match visibility {
            Visibility::All => {}
            Visibility::Titles(titles) => {
                query = query.filter(users::Column::Title.is_in(titles.iter().cloned()));
            }
            Visibility::Nothing => return Ok(Vec::new()),
        }
        let models = query
            .order_by_asc(users::Column::FullName)
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list employees")?;
        Ok(models.into_iter().map(employee_from_model).collect())
    }

    async fn identity_taken(
        &self,
        email: Option<&str>,
        employee_code: Option<&str>,
        fingerprint_code: Option<&str>,
        exclude: Option<Uuid>,
    ) -> Result<bool, HrServiceError> {
        if email.is_none() && employee_code.is_none() && fingerprint_code.is_none() {
            return Ok(false);
        }
        let mut any = Condition::any();
        if let Some(email) = email {
            any = any.add(users::Column::Email.eq(email));
        }
        if let Some(code) = employee_code {
            any = any.add(users::Column::EmployeeCode.eq(code));
        }
        if let Some(fingerprint) = fingerprint_code {
            any = any.add(users::Column::FingerprintCode.eq(fingerprint));
        }
        let mut query = users::Entity::find().filter(any);
        if let Some(id) = exclude {
            query = query.filter(users::Column::Id.ne(id));
        }
        let hit = query
            .select_only()
            .column(users::Column::Id)
            .into_tuple::<Uuid>()
            .one(&self.db)
            .await
            .context("check employee identity uniqueness")?;
        Ok(hit.is_some())
    }

    async fn create_with_outbox(
        &self,
        employee: &Employee,
        event: &OutboxEvent,
    ) -> Result<(), HrServiceError> {
        let model = employee_to_active_model(employee);
        let event = event.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    model.insert(txn).await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(err) | TransactionError::Transaction(err) => {
                    conflict_or_internal(err, "create employee with outbox event")
                }
            })
    }

    async fn update(&self, employee: &Employee) -> Result<(), HrServiceError> {
        employee_to_active_model(employee)
            .update(&self.db)
            .await
            .map_err(|e| conflict_or_internal(e, "update employee"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, HrServiceError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete employee")?;
        Ok(result.rows_affected > 0)
    }
}

fn employee_from_model(model: users::Model) -> Employee {
    let roles: Vec<Role> = model
        .roles
        .as_array()
        .map(|names| {
            names
                .iter()
                .filter_map(|n| n.as_str().and_then(Role::from_name))
                .collect()
        })
        .unwrap_or_default();
    Employee {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        roles,
        active: model.active,
        full_name: model.full_name,
        full_name_localized: model.full_name_localized,
        employee_code: model.employee_code,
        fingerprint_code: model.fingerprint_code,
        job_position: model.job_position,
        branch: model.branch,
        title: model.title,
        profile: Profile {
            first_name: model.first_name,
            last_name: model.last_name,
            bio: model.bio,
            phone_number: model.phone_number,
            city: model.city,
            country: model.country,
            location: model.location,
            platform_usage_count: model.platform_usage_count,
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn employee_to_active_model(employee: &Employee) -> users::ActiveModel {
    let roles: Vec<&str> = employee.roles.iter().map(|r| r.as_str()).collect();
    let profile = &employee.profile;
    users::ActiveModel {
        id: Set(employee.id),
        username: Set(employee.username.clone()),
        email: Set(employee.email.clone()),
        password_hash: Set(employee.password_hash.clone()),
        roles: Set(serde_json::json!(roles)),
        active: Set(employee.active),
        full_name: Set(employee.full_name.clone()),
        full_name_localized: Set(employee.full_name_localized.clone()),
        employee_code: Set(employee.employee_code.clone()),
        fingerprint_code: Set(employee.fingerprint_code.clone()),
        job_position: Set(employee.job_position.clone()),
        branch: Set(employee.branch.clone()),
        title: Set(employee.title.clone()),
        first_name: Set(profile.first_name.clone()),
        last_name: Set(profile.last_name.clone()),
        bio: Set(profile.bio.clone()),
        phone_number: Set(profile.phone_number.clone()),
        city: Set(profile.city.clone()),
        country: Set(profile.country.clone()),
        location: Set(profile.location.clone()),
        platform_usage_count: Set(profile.platform_usage_count),
        created_at: Set(employee.created_at),
        updated_at: Set(employee.updated_at),
    }
}

async fn insert_outbox_event(
    txn: &DatabaseTransaction,
    event: &OutboxEvent,
) -> Result<(), DbErr> {
    let now = Utc::now();
    outbox_events::ActiveModel {
        id: Set(event.id),
        kind: Set(event.kind.clone()),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        attempts: Set(0),
        last_error: Set(None),
        created_at: Set(now),
        next_attempt_at: Set(now),
        processed_at: Set(None),
        failed_at: Set(None),
    }
    .insert(txn)
    .await?;
    Ok(())
}

// ── Leave request repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLeaveRequestRepository {
    pub db: DatabaseConnection,
}

impl DbLeaveRequestRepository {
    /// Load the selected dates of every request in one query and attach them.
    async fn with_dates(
        &self,
        models: Vec<requests::Model>,
    ) -> Result<Vec<LeaveRequest>, HrServiceError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let rows = request_dates::Entity::find()
            .filter(request_dates::Column::RequestId.is_in(models.iter().map(|m| m.id)))
            .order_by_asc(request_dates::Column::RequestId)
            .order_by_asc(request_dates::Column::Position)
            .all(&self.db)
            .await
            .context("load request dates")?;
        let mut dates: HashMap<Uuid, Vec<NaiveDate>> = HashMap::new();
        for row in rows {
            dates.entry(row.request_id).or_default().push(row.date);
        }
        let requests = models
            .into_iter()
            .map(|m| {
                let selected = dates.remove(&m.id).unwrap_or_default();
                request_from_model(m, selected)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(requests)
    }
}

impl LeaveRequestRepository for DbLeaveRequestRepository {
    async fn create(&self, request: &LeaveRequest) -> Result<(), HrServiceError> {
        let number_of_days =
            i32::try_from(request.number_of_days).context("number_of_days out of range")?;
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let request = request.clone();
                Box::pin(async move {
                    requests::ActiveModel {
                        id: Set(request.id),
                        employee_id: Set(request.employee_id),
                        employee_name: Set(request.employee_name.clone()),
                        employee_code: Set(request.employee_code.clone()),
                        request_type: Set(request.request_type.as_str().to_owned()),
                        start_date: Set(request.start_date),
                        end_date: Set(request.end_date),
                        number_of_days: Set(number_of_days),
                        reason: Set(request.reason.clone()),
                        notes: Set(request.notes.clone()),
                        status: Set(request.status.as_str().to_owned()),
                        source: Set(request.source.as_str().to_owned()),
                        created_at: Set(request.created_at),
                        updated_at: Set(request.updated_at),
                    }
                    .insert(txn)
                    .await?;

                    for (position, date) in request.selected_dates.iter().enumerate() {
                        request_dates::ActiveModel {
                            id: Set(Uuid::now_v7()),
                            request_id: Set(request.id),
                            date: Set(*date),
                            position: Set(i32::try_from(position)
                                .map_err(|e| DbErr::Custom(e.to_string()))?),
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create leave request")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LeaveRequest>, HrServiceError> {
        let model = requests::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find leave request by id")?;
        match model {
            Some(model) => Ok(self.with_dates(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_by_source(
        &self,
        source: RequestSource,
    ) -> Result<Vec<LeaveRequest>, HrServiceError> {
        let models = requests::Entity::find()
            .filter(requests::Column::Source.eq(source.as_str()))
            .order_by_desc(requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list leave requests by source")?;
        self.with_dates(models).await
    }

    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        limit: u32,
    ) -> Result<Vec<LeaveRequest>, HrServiceError> {
        let models = requests::Entity::find()
            .filter(requests::Column::EmployeeId.eq(employee_id))
            .order_by_desc(requests::Column::CreatedAt)
            .limit(u64::from(limit))
            .all(&self.db)
            .await
            .context("list leave requests by employee")?;
        self.with_dates(models).await
    }

    async fn list_approved_overlapping(
        &self,
        employee_ids: &[Uuid],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LeaveRequest>, HrServiceError> {
        if employee_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = requests::Entity::find()
            .filter(requests::Column::EmployeeId.is_in(employee_ids.iter().copied()))
            .filter(requests::Column::Status.eq(RequestStatus::Approved.as_str()))
            .filter(requests::Column::StartDate.lte(to))
            .filter(requests::Column::EndDate.gte(from))
            .order_by_asc(requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list approved leave requests in range")?;
        self.with_dates(models).await
    }

    async fn list_approved(&self) -> Result<Vec<LeaveRequest>, HrServiceError> {
        let models = requests::Entity::find()
            .filter(requests::Column::Status.eq(RequestStatus::Approved.as_str()))
            .order_by_desc(requests::Column::StartDate)
            .order_by_desc(requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list approved leave requests")?;
        self.with_dates(models).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<Option<LeaveRequest>, HrServiceError> {
        let Some(row) = requests::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find leave request for status update")?
        else {
            return Ok(None);
        };
        let mut request = row.into_active_model();
        request.status = Set(status.as_str().to_owned());
        request.updated_at = Set(Utc::now());
        let updated = request
            .update(&self.db)
            .await
            .context("update leave request status")?;
        Ok(self.with_dates(vec![updated]).await?.pop())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, HrServiceError> {
        let result = requests::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete leave request")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_approved(&self) -> Result<u64, HrServiceError> {
        let result = requests::Entity::delete_many()
            .filter(requests::Column::Status.eq(RequestStatus::Approved.as_str()))
            .exec(&self.db)
            .await
            .context("delete approved leave requests")?;
        Ok(result.rows_affected)
    }
}

fn request_from_model(
    model: requests::Model,
    selected_dates: Vec<NaiveDate>,
) -> anyhow::Result<LeaveRequest> {
    Ok(LeaveRequest {
        id: model.id,
        employee_id: model.employee_id,
        employee_name: model.employee_name,
        employee_code: model.employee_code,
        request_type: model.request_type.parse()?,
        start_date: model.start_date,
        end_date: model.end_date,
        selected_dates,
        number_of_days: u32::try_from(model.number_of_days)
            .context("negative number_of_days in store")?,
        reason: model.reason,
        notes: model.notes,
        status: model.status.parse()?,
        source: model.source.parse()?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Report repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReportRepository {
    pub db: DatabaseConnection,
}

impl ReportRepository for DbReportRepository {
    async fn create(&self, report: &Report) -> Result<(), HrServiceError> {
        let age = i32::try_from(report.age).context("age out of range")?;
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let report = report.clone();
                Box::pin(async move {
                    reports::ActiveModel {
                        id: Set(report.id),
                        owner_id: Set(report.owner_id),
                        patient_name: Set(report.patient_name.clone()),
                        age: Set(age),
                        gender: Set(report.gender.as_str().to_owned()),
                        scan_type: Set(report.scan_type.as_str().to_owned()),
                        clinical_notes: Set(report.clinical_notes.clone()),
                        diagnosis: Set(report.diagnosis.clone()),
                        confidence: Set(report.confidence),
                        status: Set(report.status.as_str().to_owned()),
                        risk_level: Set(report.risk_level.as_str().to_owned()),
                        details: Set(report.details.clone()),
                        recommendations: Set(serde_json::json!(report.recommendations)),
                        image_url: Set(report.image_url.clone()),
                        created_at: Set(report.created_at),
                    }
                    .insert(txn)
                    .await?;

                    users::Entity::update_many()
                        .col_expr(
                            users::Column::PlatformUsageCount,
                            Expr::col(users::Column::PlatformUsageCount).add(1),
                        )
                        .filter(users::Column::Id.eq(report.owner_id))
                        .exec(txn)
                        .await?;
                    Ok(())
                })
            })
            .await
            .context("create report")?;
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Report>, HrServiceError> {
        let models = reports::Entity::find()
            .filter(reports::Column::OwnerId.eq(owner_id))
            .order_by_desc(reports::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list reports by owner")?;
        let reports = models
            .into_iter()
            .map(report_from_model)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(reports)
    }

    async fn find_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Report>, HrServiceError> {
        let model = reports::Entity::find_by_id(id)
            .filter(reports::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await
            .context("find owned report")?;
        Ok(model.map(report_from_model).transpose()?)
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> Result<bool, HrServiceError> {
        let result = reports::Entity::delete_many()
            .filter(reports::Column::Id.eq(id))
            .filter(reports::Column::OwnerId.eq(owner_id))
            .exec(&self.db)
            .await
            .context("delete owned report")?;
        Ok(result.rows_affected > 0)
    }
}

fn report_from_model(model: reports::Model) -> anyhow::Result<Report> {
    Ok(Report {
        id: model.id,
        owner_id: model.owner_id,
        patient_name: model.patient_name,
        age: u32::try_from(model.age).context("negative age in store")?,
        gender: model.gender.parse()?,
        scan_type: model.scan_type.parse()?,
        clinical_notes: model.clinical_notes,
        diagnosis: model.diagnosis,
        confidence: model.confidence,
        status: model.status.parse()?,
        risk_level: model.risk_level.parse()?,
        details: model.details,
        recommendations: serde_json::from_value(model.recommendations)
            .context("decode report recommendations")?,
        image_url: model.image_url,
        created_at: model.created_at,
    })
}
