use hrdesk_domain::report::{ReportStatus, ScanType};
use hrdesk_hr::error::HrServiceError;
use hrdesk_hr::usecase::report::{
    CreateReportInput, CreateReportUseCase, DeleteReportUseCase, GetReportUseCase,
    ListReportsUseCase, ReportStatsUseCase,
};
use hrdesk_testing::auth::MockAuth;

use crate::helpers::{MockEmployeeRepo, MockReportRepo, employee_for, test_employee, test_report};

fn report_input(patient: &str) -> CreateReportInput {
    CreateReportInput {
        patient_name: Some(patient.into()),
        age: Some(61),
        gender: Some("female".into()),
        scan_type: Some("mri".into()),
        diagnosis: Some("Small lesion".into()),
        confidence: Some(91.0),
        status: Some("critical".into()),
        risk_level: Some("High".into()),
        recommendations: vec!["Refer to oncology".into()],
        ..CreateReportInput::default()
    }
}

#[tokio::test]
async fn should_create_report_and_count_usage() {
    let auth = MockAuth::employee();
    let employees = MockEmployeeRepo::new(vec![employee_for(&auth, "Dr. Heba", "D-1", "RA")]);
    let reports = MockReportRepo::new(&employees);
    let stored = reports.reports_handle();
    let usecase = CreateReportUseCase {
        employees: employees.clone(),
        reports,
    };

    let report = usecase
        .execute(&auth.caller(), report_input("Laila Fouad"))
        .await
        .unwrap();
    usecase
        .execute(&auth.caller(), report_input("Karim Said"))
        .await
        .unwrap();

    assert_eq!(report.owner_id, auth.user_id);
    assert_eq!(report.scan_type, ScanType::Mri);
    assert_eq!(report.status, ReportStatus::Critical);
    assert_eq!(stored.lock().unwrap().len(), 2);
    let usage = employees.employees_handle().lock().unwrap()[0]
        .profile
        .platform_usage_count;
    assert_eq!(usage, 2);
}

#[tokio::test]
async fn should_reject_invalid_report_without_storing() {
    let auth = MockAuth::employee();
    let employees = MockEmployeeRepo::new(vec![employee_for(&auth, "Dr. Heba", "D-1", "RA")]);
    let reports = MockReportRepo::new(&employees);
    let stored = reports.reports_handle();
    let usecase = CreateReportUseCase { employees, reports };

    let result = usecase
        .execute(
            &auth.caller(),
            CreateReportInput {
                scan_type: Some("ultrasound".into()),
                ..report_input("Laila Fouad")
            },
        )
        .await;
    assert!(matches!(result, Err(HrServiceError::InvalidReport)), "got {result:?}");

    let result = usecase
        .execute(
            &auth.caller(),
            CreateReportInput {
                diagnosis: None,
                ..report_input("Laila Fouad")
            },
        )
        .await;
    assert!(matches!(result, Err(HrServiceError::MissingData)), "got {result:?}");
    assert!(stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_hide_reports_of_other_accounts() {
    let auth = MockAuth::employee();
    let me = employee_for(&auth, "Dr. Heba", "D-1", "RA");
    let other = test_employee("Dr. Sameh", "D-2", "RA");
    let employees = MockEmployeeRepo::new(vec![me.clone(), other.clone()]);
    let reports = MockReportRepo::new(&employees);
    let mine = test_report(&me, "Laila Fouad", 80.0, ReportStatus::Normal);
    let theirs = test_report(&other, "Karim Said", 70.0, ReportStatus::Abnormal);
    reports
        .reports_handle()
        .lock()
        .unwrap()
        .extend([mine.clone(), theirs.clone()]);

    let listed = ListReportsUseCase {
        employees: employees.clone(),
        reports: reports.clone(),
    }
    .execute(&auth.caller())
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, mine.id);

    let get = GetReportUseCase {
        employees: employees.clone(),
        reports: reports.clone(),
    };
    assert_eq!(get.execute(&auth.caller(), mine.id).await.unwrap().id, mine.id);
    let result = get.execute(&auth.caller(), theirs.id).await;
    assert!(matches!(result, Err(HrServiceError::ReportNotFound)), "got {result:?}");

    let delete = DeleteReportUseCase {
        employees,
        reports: reports.clone(),
    };
    let result = delete.execute(&auth.caller(), theirs.id).await;
    assert!(matches!(result, Err(HrServiceError::ReportNotFound)), "got {result:?}");
    delete.execute(&auth.caller(), mine.id).await.unwrap();
    assert_eq!(reports.reports_handle().lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_summarize_own_reports() {
    let auth = MockAuth::employee();
    let mut me = employee_for(&auth, "Dr. Heba", "D-1", "RA");
    me.profile.platform_usage_count = 5;
    let employees = MockEmployeeRepo::new(vec![me.clone()]);
    let reports = MockReportRepo::new(&employees);
    reports.reports_handle().lock().unwrap().extend([
        test_report(&me, "Laila Fouad", 90.0, ReportStatus::Normal),
        test_report(&me, "laila fouad", 85.0, ReportStatus::Critical),
        test_report(&me, "Karim Said", 70.0, ReportStatus::Abnormal),
    ]);

    let stats = ReportStatsUseCase { employees, reports }
        .execute(&auth.caller())
        .await
        .unwrap();
    assert_eq!(stats.total_reports, 3);
    assert_eq!(stats.average_accuracy, 81.7);
    assert_eq!(stats.unique_patients, 2);
    assert_eq!(stats.platform_usage, 5);
    assert_eq!(
        (stats.normal_count, stats.abnormal_count, stats.critical_count),
        (1, 1, 1)
    );
}

#[tokio::test]
async fn should_require_known_account() {
    let employees = MockEmployeeRepo::empty();
    let reports = MockReportRepo::new(&employees);
    let result = ListReportsUseCase { employees, reports }
        .execute(&MockAuth::employee().caller())
        .await;
    assert!(
        matches!(result, Err(HrServiceError::EmployeeNotFound)),
        "got {result:?}"
    );
}
