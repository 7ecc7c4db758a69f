use std::str::FromStr;

use chrono::Utc;
use uuid::Uuid;

use hrdesk_auth_types::identity::CallerContext;
use hrdesk_domain::report::{Gender, ReportStatus, RiskLevel, ScanType};

use crate::domain::repository::{EmployeeRepository, ReportRepository};
use crate::domain::stats::ReportStats;
use crate::domain::types::{Employee, Report, non_empty};
use crate::error::HrServiceError;

/// Every report operation re-resolves the owner from the caller's identity.
async fn resolve_owner<E: EmployeeRepository>(
    employees: &E,
    caller: &CallerContext,
) -> Result<Employee, HrServiceError> {
    employees
        .find_by_id(caller.user_id)
        .await?
        .ok_or(HrServiceError::EmployeeNotFound)
}

// ── CreateReport ─────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct CreateReportInput {
    pub patient_name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub scan_type: Option<String>,
    pub clinical_notes: Option<String>,
    pub diagnosis: Option<String>,
    pub confidence: Option<f64>,
    pub status: Option<String>,
    pub risk_level: Option<String>,
    pub details: Option<String>,
    pub recommendations: Vec<String>,
    pub image_url: Option<String>,
}

fn required(value: &Option<String>) -> Result<&str, HrServiceError> {
    non_empty(value.as_deref()).ok_or(HrServiceError::MissingData)
}

fn wire<T: FromStr>(raw: &str) -> Result<T, HrServiceError> {
    raw.trim().parse().map_err(|_| HrServiceError::InvalidReport)
}

/// Absent required fields fail first, then enum names and numeric ranges.
fn validate_report(
    owner_id: Uuid,
    input: CreateReportInput,
) -> Result<Report, HrServiceError> {
    let patient_name = required(&input.patient_name)?;
    let gender = required(&input.gender)?;
    let scan_type = required(&input.scan_type)?;
    let diagnosis = required(&input.diagnosis)?;
    let status = required(&input.status)?;
    let risk_level = required(&input.risk_level)?;
    let age = input.age.ok_or(HrServiceError::MissingData)?;
    let confidence = input.confidence.ok_or(HrServiceError::MissingData)?;

    let age = i32::try_from(age)
        .ok()
        .filter(|a| *a > 0)
        .and_then(|a| u32::try_from(a).ok())
        .ok_or(HrServiceError::InvalidReport)?;
    if !(0.0..=100.0).contains(&confidence) {
        return Err(HrServiceError::InvalidReport);
    }

    Ok(Report {
        id: Uuid::now_v7(),
        owner_id,
        patient_name: patient_name.trim().to_owned(),
        age,
        gender: wire::<Gender>(gender)?,
        scan_type: wire::<ScanType>(scan_type)?,
        clinical_notes: input.clinical_notes.unwrap_or_default(),
        diagnosis: diagnosis.to_owned(),
        confidence,
        status: wire::<ReportStatus>(status)?,
        risk_level: wire::<RiskLevel>(risk_level)?,
        details: input.details.unwrap_or_default(),
        recommendations: input.recommendations,
        image_url: input.image_url.unwrap_or_default(),
        created_at: Utc::now(),
    })
}

pub struct CreateReportUseCase<E: EmployeeRepository, R: ReportRepository> {
    pub employees: E,
    pub reports: R,
}

impl<E: EmployeeRepository, R: ReportRepository> CreateReportUseCase<E, R> {
    pub async fn execute(
        &self,
        caller: &CallerContext,
        input: CreateReportInput,
    ) -> Result<Report, HrServiceError> {
        let owner = resolve_owner(&self.employees, caller).await?;
        let report = validate_report(owner.id, input)?;
        self.reports.create(&report).await?;
        Ok(report)
    }
}

// ── ListReports ──────────────────────────────────────────────────────────────

pub struct ListReportsUseCase<E: EmployeeRepository, R: ReportRepository> {
    pub employees: E,
    pub reports: R,
}

impl<E: EmployeeRepository, R: ReportRepository> ListReportsUseCase<E, R> {
    pub async fn execute(&self, caller: &CallerContext) -> Result<Vec<Report>, HrServiceError> {
        let owner = resolve_owner(&self.employees, caller).await?;
        self.reports.list_by_owner(owner.id).await
    }
}

// ── GetReport ────────────────────────────────────────────────────────────────

pub struct GetReportUseCase<E: EmployeeRepository, R: ReportRepository> {
    pub employees: E,
    pub reports: R,
}

impl<E: EmployeeRepository, R: ReportRepository> GetReportUseCase<E, R> {
    pub async fn execute(&self, caller: &CallerContext, id: Uuid) -> Result<Report, HrServiceError> {
        let owner = resolve_owner(&self.employees, caller).await?;
        self.reports
            .find_owned(id, owner.id)
            .await?
            .ok_or(HrServiceError::ReportNotFound)
    }
}

// ── DeleteReport ─────────────────────────────────────────────────────────────

pub struct DeleteReportUseCase<E: EmployeeRepository, R: ReportRepository> {
    pub employees: E,
    pub reports: R,
}

impl<E: EmployeeRepository, R: ReportRepository> DeleteReportUseCase<E, R> {
    pub async fn execute(&self, caller: &CallerContext, id: Uuid) -> Result<(), HrServiceError> {
        let owner = resolve_owner(&self.employees, caller).await?;
        if !self.reports.delete_owned(id, owner.id).await? {
            return Err(HrServiceError::ReportNotFound);
        }
        Ok(())
    }
}

// ── ReportStats ──────────────────────────────────────────────────────────────

pub struct ReportStatsUseCase<E: EmployeeRepository, R: ReportRepository> {
    pub employees: E,
    pub reports: R,
}

impl<E: EmployeeRepository, R: ReportRepository> ReportStatsUseCase<E, R> {
    pub async fn execute(&self, caller: &CallerContext) -> Result<ReportStats, HrServiceError> {
        let owner = resolve_owner(&self.employees, caller).await?;
        let reports = self.reports.list_by_owner(owner.id).await?;
        Ok(ReportStats::compute(
            &reports,
            owner.profile.platform_usage_count,
        ))
    }
}
