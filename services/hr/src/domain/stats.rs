use std::collections::HashSet;

use hrdesk_domain::report::ReportStatus;

use crate::domain::types::Report;

/// Aggregate view over one account's reports.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportStats {
    pub total_reports: usize,
    /// Mean confidence, rounded to one decimal. Zero when there are no reports.
    pub average_accuracy: f64,
    /// Distinct patient names, compared case-insensitively.
    pub unique_patients: usize,
    pub platform_usage: i32,
    pub normal_count: usize,
    pub abnormal_count: usize,
    pub critical_count: usize,
}

impl ReportStats {
    pub fn compute(reports: &[Report], platform_usage: i32) -> Self {
        let total_reports = reports.len();
        let average_accuracy = if total_reports == 0 {
            0.0
        } else {
            let sum: f64 = reports.iter().map(|r| r.confidence).sum();
            (sum / total_reports as f64 * 10.0).round() / 10.0
        };
        let unique_patients = reports
            .iter()
            .map(|r| r.patient_name.to_lowercase())
            .collect::<HashSet<_>>()
            .len();
        let count = |status: ReportStatus| reports.iter().filter(|r| r.status == status).count();

        Self {
            total_reports,
            average_accuracy,
            unique_patients,
            platform_usage,
            normal_count: count(ReportStatus::Normal),
            abnormal_count: count(ReportStatus::Abnormal),
            critical_count: count(ReportStatus::Critical),
        }
    }
}
