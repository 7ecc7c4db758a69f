use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hrdesk_auth_types::identity::CallerContext;
use hrdesk_domain::report::{Gender, ReportStatus, RiskLevel, ScanType};

use crate::domain::stats::ReportStats;
use crate::domain::types::Report;
use crate::error::HrServiceError;
use crate::handlers::extract::{IdPath, JsonBody};
use crate::state::AppState;
use crate::usecase::report::{
    CreateReportInput, CreateReportUseCase, DeleteReportUseCase, GetReportUseCase,
    ListReportsUseCase, ReportStatsUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: Uuid,
    pub patient_name: String,
    pub age: u32,
    pub gender: Gender,
    pub scan_type: ScanType,
    pub clinical_notes: String,
    pub diagnosis: String,
    pub confidence: f64,
    pub status: ReportStatus,
    pub risk_level: RiskLevel,
    pub details: String,
    pub recommendations: Vec<String>,
    pub image_url: String,
    #[serde(serialize_with = "hrdesk_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportResponse {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            patient_name: r.patient_name,
            age: r.age,
            gender: r.gender,
            scan_type: r.scan_type,
            clinical_notes: r.clinical_notes,
            diagnosis: r.diagnosis,
            confidence: r.confidence,
            status: r.status,
            risk_level: r.risk_level,
            details: r.details,
            recommendations: r.recommendations,
            image_url: r.image_url,
            created_at: r.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct ReportEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub report: ReportResponse,
}

// ── POST /reports ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportBody {
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
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub image_url: Option<String>,
}

pub async fn create_report(
    caller: CallerContext,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateReportBody>,
) -> Result<(StatusCode, Json<ReportEnvelope>), HrServiceError> {
    let usecase = CreateReportUseCase {
        employees: state.employee_repo(),
        reports: state.report_repo(),
    };
    let report = usecase
        .execute(
            &caller,
            CreateReportInput {
                patient_name: body.patient_name,
                age: body.age,
                gender: body.gender,
                scan_type: body.scan_type,
                clinical_notes: body.clinical_notes,
                diagnosis: body.diagnosis,
                confidence: body.confidence,
                status: body.status,
                risk_level: body.risk_level,
                details: body.details,
                recommendations: body.recommendations,
                image_url: body.image_url,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ReportEnvelope {
            message: Some("Report created successfully"),
            report: report.into(),
        }),
    ))
}

// ── GET /reports ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ReportListResponse {
    pub reports: Vec<ReportResponse>,
}

pub async fn list_reports(
    caller: CallerContext,
    State(state): State<AppState>,
) -> Result<Json<ReportListResponse>, HrServiceError> {
    let usecase = ListReportsUseCase {
        employees: state.employee_repo(),
        reports: state.report_repo(),
    };
    let reports = usecase.execute(&caller).await?;
    Ok(Json(ReportListResponse {
        reports: reports.into_iter().map(Into::into).collect(),
    }))
}

// ── GET /reports/{id} ────────────────────────────────────────────────────────

pub async fn get_report(
    caller: CallerContext,
    State(state): State<AppState>,
    IdPath(id): IdPath<Uuid>,
) -> Result<Json<ReportEnvelope>, HrServiceError> {
    let usecase = GetReportUseCase {
        employees: state.employee_repo(),
        reports: state.report_repo(),
    };
    let report = usecase.execute(&caller, id).await?;
    Ok(Json(ReportEnvelope {
        message: None,
        report: report.into(),
    }))
}

// ── DELETE /reports/{id} ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DeletedReportResponse {
    pub message: &'static str,
}

pub async fn delete_report(
    caller: CallerContext,
    State(state): State<AppState>,
    IdPath(id): IdPath<Uuid>,
) -> Result<Json<DeletedReportResponse>, HrServiceError> {
    let usecase = DeleteReportUseCase {
        employees: state.employee_repo(),
        reports: state.report_repo(),
    };
    usecase.execute(&caller, id).await?;
    Ok(Json(DeletedReportResponse {
        message: "Report deleted successfully",
    }))
}

// ── GET /reports/stats ───────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatsResponse {
    pub total_reports: usize,
    pub average_accuracy: f64,
    pub unique_patients: usize,
    pub platform_usage: i32,
    pub normal_count: usize,
    pub abnormal_count: usize,
    pub critical_count: usize,
}

impl From<ReportStats> for ReportStatsResponse {
    fn from(s: ReportStats) -> Self {
        Self {
            total_reports: s.total_reports,
            average_accuracy: s.average_accuracy,
            unique_patients: s.unique_patients,
            platform_usage: s.platform_usage,
            normal_count: s.normal_count,
            abnormal_count: s.abnormal_count,
            critical_count: s.critical_count,
        }
    }
}

#[derive(Serialize)]
pub struct StatsEnvelope {
    pub stats: ReportStatsResponse,
}

pub async fn report_stats(
    caller: CallerContext,
    State(state): State<AppState>,
) -> Result<Json<StatsEnvelope>, HrServiceError> {
    let usecase = ReportStatsUseCase {
        employees: state.employee_repo(),
        reports: state.report_repo(),
    };
    let stats = usecase.execute(&caller).await?;
    Ok(Json(StatsEnvelope {
        stats: stats.into(),
    }))
}
