use chrono_tz::Tz;

use hrdesk_domain::leave::{RequestSource, RequestStatus, RequestType};
use hrdesk_domain::pagination::RecentLimit;
use hrdesk_hr::error::HrServiceError;
use hrdesk_hr::usecase::request::{
    ADMIN_REQUEST_REASON, ApprovedExportUseCase, CreateAdminRequestInput,
    CreateAdminRequestUseCase, CreateRequestInput, CreateRequestUseCase,
    DeleteApprovedRequestsUseCase, DeleteRequestUseCase, ListMyRequestsUseCase,
    ListRequestsUseCase, UpdateRequestStatusUseCase,
};
use hrdesk_hr::usecase::schedule::WeeklyGridUseCase;
use hrdesk_testing::auth::MockAuth;
use hrdesk_testing::fixture::{date, reference_today};

use crate::helpers::{MockEmployeeRepo, MockRequestRepo, employee_for, test_employee, test_request};

fn vacation_input() -> CreateRequestInput {
    CreateRequestInput {
        request_type: Some("VACATION".into()),
        start_date: Some("2024-03-04".into()),
        end_date: Some("2024-03-06".into()),
        number_of_days: Some(3),
        ..CreateRequestInput::default()
    }
}

fn create_usecase(
    employees: MockEmployeeRepo,
    requests: MockRequestRepo,
) -> CreateRequestUseCase<MockEmployeeRepo, MockRequestRepo> {
    CreateRequestUseCase {
        employees,
        requests,
        work_timezone: Tz::UTC,
    }
}

#[tokio::test]
async fn should_walk_vacation_from_pending_to_schedule_and_export() {
    let auth = MockAuth::employee();
    let admin = MockAuth::admin();
    let me = employee_for(&auth, "Mona Adel", "E-7", "RA");
    let employees = MockEmployeeRepo::new(vec![me.clone()]);
    let requests = MockRequestRepo::empty();

    let created = create_usecase(employees.clone(), requests.clone())
        .execute(&auth.caller(), vacation_input())
        .await
        .unwrap();
    assert_eq!(created.status, RequestStatus::Pending);
    assert_eq!(created.source, RequestSource::EmployeeRequest);
    assert_eq!(created.employee_id, me.id);
    assert_eq!(created.employee_name, "Mona Adel");

    let approved = UpdateRequestStatusUseCase {
        repo: requests.clone(),
    }
    .execute(&admin.caller(), created.id, Some("Approved"))
    .await
    .unwrap();
    assert_eq!(approved.status, RequestStatus::Approved);

    let rows = ApprovedExportUseCase {
        employees: employees.clone(),
        requests: requests.clone(),
    }
    .execute(&admin.caller())
    .await
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, created.id);
    assert_eq!(rows[0].number_of_days, "3");

    let admin_record = employee_for(&admin, "Admin", "ADMIN001", "HR");
    employees.employees_handle().lock().unwrap().push(admin_record);
    let grid = WeeklyGridUseCase {
        employees,
        requests,
        teams: Default::default(),
    }
    .execute(&admin.caller(), reference_today())
    .await
    .unwrap();
    let row = grid
        .employees
        .iter()
        .find(|e| e.employee_id == me.id)
        .expect("employee row");
    let marked: Vec<_> = row
        .cells
        .iter()
        .filter(|c| c.mark.is_some())
        .map(|c| c.day.date)
        .collect();
    assert_eq!(marked, vec![date(2024, 3, 4), date(2024, 3, 5), date(2024, 3, 6)]);
}

#[tokio::test]
async fn should_approve_wfh_only_when_client_asks() {
    let auth = MockAuth::employee();
    let employees = MockEmployeeRepo::new(vec![employee_for(&auth, "Omar", "E-1", "RA")]);
    let usecase = create_usecase(employees, MockRequestRepo::empty());

    let wfh = usecase
        .execute(
            &auth.caller(),
            CreateRequestInput {
                request_type: Some("WFH".into()),
                status: Some("Approved".into()),
                number_of_days: Some(1),
                end_date: Some("2024-03-04".into()),
                ..vacation_input()
            },
        )
        .await
        .unwrap();
    assert_eq!(wfh.status, RequestStatus::Approved);

    let vacation = usecase
        .execute(
            &auth.caller(),
            CreateRequestInput {
                status: Some("Approved".into()),
                ..vacation_input()
            },
        )
        .await
        .unwrap();
    assert_eq!(vacation.status, RequestStatus::Pending);
}

#[tokio::test]
async fn should_approve_admin_direct_source() {
    let auth = MockAuth::employee();
    let employees = MockEmployeeRepo::new(vec![employee_for(&auth, "Omar", "E-1", "RA")]);
    let created = create_usecase(employees, MockRequestRepo::empty())
        .execute(
            &auth.caller(),
            CreateRequestInput {
                source: Some("ADMIN_DIRECT".into()),
                ..vacation_input()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.status, RequestStatus::Approved);
    assert_eq!(created.source, RequestSource::AdminDirect);
}

#[tokio::test]
async fn should_file_for_named_employee_or_fall_back_to_caller() {
    let auth = MockAuth::employee();
    let me = employee_for(&auth, "Omar", "E-1", "RA");
    let colleague = test_employee("Salma Nabil", "E-2", "RA");
    let employees = MockEmployeeRepo::new(vec![me.clone(), colleague.clone()]);
    let usecase = create_usecase(employees, MockRequestRepo::empty());

    let for_colleague = usecase
        .execute(
            &auth.caller(),
            CreateRequestInput {
                employee_id: Some(colleague.id.to_string()),
                ..vacation_input()
            },
        )
        .await
        .unwrap();
    assert_eq!(for_colleague.employee_id, colleague.id);
    assert_eq!(for_colleague.employee_code.as_deref(), Some("E-2"));

    let unknown = usecase
        .execute(
            &auth.caller(),
            CreateRequestInput {
                employee_id: Some(uuid::Uuid::now_v7().to_string()),
                ..vacation_input()
            },
        )
        .await
        .unwrap();
    assert_eq!(unknown.employee_id, me.id);
}

#[tokio::test]
async fn should_default_reason_to_notes_and_keep_selected_dates() {
    let auth = MockAuth::employee();
    let employees = MockEmployeeRepo::new(vec![employee_for(&auth, "Omar", "E-1", "RA")]);
    let requests = MockRequestRepo::empty();
    let created = create_usecase(employees, requests.clone())
        .execute(
            &auth.caller(),
            CreateRequestInput {
                notes: Some("dentist".into()),
                selected_dates: vec!["2024-03-06".into(), "2024-03-04T10:00:00.000Z".into()],
                number_of_days: Some(2),
                ..vacation_input()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.reason, "dentist");
    assert_eq!(created.selected_dates, vec![date(2024, 3, 6), date(2024, 3, 4)]);
    assert_eq!(requests.requests_handle().lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_invalid_submissions() {
    let auth = MockAuth::employee();
    let employees = MockEmployeeRepo::new(vec![employee_for(&auth, "Omar", "E-1", "RA")]);
    let requests = MockRequestRepo::empty();
    let usecase = create_usecase(employees, requests.clone());

    let cases = [
        (
            CreateRequestInput {
                number_of_days: None,
                ..vacation_input()
            },
            "MISSING_DATA",
        ),
        (
            CreateRequestInput {
                request_type: Some("SICK".into()),
                ..vacation_input()
            },
            "INVALID_REQUEST_TYPE",
        ),
        (
            CreateRequestInput {
                start_date: Some("yesterday".into()),
                ..vacation_input()
            },
            "INVALID_DATE",
        ),
        (
            CreateRequestInput {
                number_of_days: Some(0),
                ..vacation_input()
            },
            "INVALID_NUMBER_OF_DAYS",
        ),
        (
            CreateRequestInput {
                number_of_days: Some(3_000_000_000),
                ..vacation_input()
            },
            "INVALID_NUMBER_OF_DAYS",
        ),
        (
            CreateRequestInput {
                source: Some("HR_PORTAL".into()),
                ..vacation_input()
            },
            "INVALID_SOURCE",
        ),
    ];
    for (input, kind) in cases {
        let result = usecase.execute(&auth.caller(), input).await;
        match result {
            Err(e) => assert_eq!(e.kind(), kind),
            Ok(r) => panic!("expected {kind}, got {r:?}"),
        }
    }
    assert!(requests.requests_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_employee_not_found_for_unknown_caller() {
    let result = create_usecase(MockEmployeeRepo::empty(), MockRequestRepo::empty())
        .execute(&MockAuth::employee().caller(), vacation_input())
        .await;
    assert!(
        matches!(result, Err(HrServiceError::EmployeeNotFound)),
        "expected EmployeeNotFound, got {result:?}"
    );
}

// ── Admin direct create ──────────────────────────────────────────────────────

fn admin_input(employee_id: &str) -> CreateAdminRequestInput {
    CreateAdminRequestInput {
        employee_id: Some(employee_id.into()),
        request_type: Some("LATE_PERMISSION".into()),
        start_date: Some("2024-03-05".into()),
        end_date: Some("2024-03-05".into()),
        number_of_days: Some(1),
    }
}

#[tokio::test]
async fn should_create_approved_admin_request_with_localized_name() {
    let mut target = test_employee("Mona Adel", "E-7", "RA");
    target.full_name_localized = Some("منى عادل".into());
    let usecase = CreateAdminRequestUseCase {
        employees: MockEmployeeRepo::new(vec![target.clone()]),
        requests: MockRequestRepo::empty(),
        work_timezone: Tz::UTC,
    };
    let created = usecase
        .execute(&MockAuth::admin().caller(), admin_input(&target.id.to_string()))
        .await
        .unwrap();
    assert_eq!(created.status, RequestStatus::Approved);
    assert_eq!(created.source, RequestSource::AdminDirect);
    assert_eq!(created.employee_name, "منى عادل");
    assert_eq!(created.reason, ADMIN_REQUEST_REASON);
    assert_eq!(created.request_type, RequestType::LatePermission);
}

#[tokio::test]
async fn should_guard_admin_request() {
    let target = test_employee("Mona Adel", "E-7", "RA");
    let usecase = CreateAdminRequestUseCase {
        employees: MockEmployeeRepo::new(vec![target.clone()]),
        requests: MockRequestRepo::empty(),
        work_timezone: Tz::UTC,
    };

    let result = usecase
        .execute(&MockAuth::employee().caller(), admin_input(&target.id.to_string()))
        .await;
    assert!(matches!(result, Err(HrServiceError::Forbidden)), "got {result:?}");

    let result = usecase
        .execute(
            &MockAuth::admin().caller(),
            admin_input(&uuid::Uuid::now_v7().to_string()),
        )
        .await;
    assert!(matches!(result, Err(HrServiceError::EmployeeNotFound)), "got {result:?}");

    let result = usecase
        .execute(
            &MockAuth::admin().caller(),
            CreateAdminRequestInput {
                employee_id: None,
                ..admin_input("")
            },
        )
        .await;
    assert!(matches!(result, Err(HrServiceError::MissingData)), "got {result:?}");
}

// ── Listing ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_employee_submitted_requests_newest_first() {
    let e = test_employee("Omar", "E-1", "RA");
    let old = test_request(&e, RequestType::Wfh, date(2024, 3, 4), date(2024, 3, 4), RequestStatus::Pending, 60);
    let new = test_request(&e, RequestType::Vacation, date(2024, 3, 5), date(2024, 3, 5), RequestStatus::Pending, 10);
    let mut direct = test_request(&e, RequestType::Wfh, date(2024, 3, 6), date(2024, 3, 6), RequestStatus::Approved, 5);
    direct.source = RequestSource::AdminDirect;
    let usecase = ListRequestsUseCase {
        repo: MockRequestRepo::new(vec![old.clone(), new.clone(), direct]),
    };

    let listed = usecase.execute(&MockAuth::admin().caller()).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![new.id, old.id]);

    let result = usecase.execute(&MockAuth::employee().caller()).await;
    assert!(matches!(result, Err(HrServiceError::Forbidden)), "got {result:?}");
}

#[tokio::test]
async fn should_cap_my_requests_at_limit() {
    let auth = MockAuth::employee();
    let me = employee_for(&auth, "Omar", "E-1", "RA");
    let other = test_employee("Salma", "E-2", "RA");
    let mut stored = Vec::new();
    for age in 0..15 {
        stored.push(test_request(&me, RequestType::Wfh, date(2024, 3, 4), date(2024, 3, 4), RequestStatus::Pending, age));
    }
    stored.push(test_request(&other, RequestType::Wfh, date(2024, 3, 4), date(2024, 3, 4), RequestStatus::Pending, 0));
    let usecase = ListMyRequestsUseCase {
        employees: MockEmployeeRepo::new(vec![me.clone(), other]),
        requests: MockRequestRepo::new(stored),
    };

    let default = usecase.execute(&auth.caller(), RecentLimit::default()).await.unwrap();
    assert_eq!(default.len(), 10);
    assert!(default.iter().all(|r| r.employee_id == me.id));
    assert!(default.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let three = usecase.execute(&auth.caller(), RecentLimit::from_raw(Some(3))).await.unwrap();
    assert_eq!(three.len(), 3);
}

// ── Status / delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_validate_status_updates() {
    let e = test_employee("Omar", "E-1", "RA");
    let request = test_request(&e, RequestType::Wfh, date(2024, 3, 4), date(2024, 3, 4), RequestStatus::Pending, 0);
    let usecase = UpdateRequestStatusUseCase {
        repo: MockRequestRepo::new(vec![request.clone()]),
    };
    let admin = MockAuth::admin().caller();

    let result = usecase.execute(&admin, request.id, Some("Done")).await;
    assert!(matches!(result, Err(HrServiceError::InvalidStatus)), "got {result:?}");

    let result = usecase.execute(&admin, uuid::Uuid::now_v7(), Some("Rejected")).await;
    assert!(matches!(result, Err(HrServiceError::RequestNotFound)), "got {result:?}");

    let result = usecase
        .execute(&MockAuth::employee().caller(), request.id, Some("Approved"))
        .await;
    assert!(matches!(result, Err(HrServiceError::Forbidden)), "got {result:?}");

    // Any status may move to any other.
    let rejected = usecase.execute(&admin, request.id, Some("Rejected")).await.unwrap();
    assert_eq!(rejected.status, RequestStatus::Rejected);
    let pending = usecase.execute(&admin, request.id, Some("Pending")).await.unwrap();
    assert_eq!(pending.status, RequestStatus::Pending);
}

#[tokio::test]
async fn should_delete_single_and_all_approved() {
    let e = test_employee("Omar", "E-1", "RA");
    let pending = test_request(&e, RequestType::Wfh, date(2024, 3, 4), date(2024, 3, 4), RequestStatus::Pending, 0);
    let approved_a = test_request(&e, RequestType::Wfh, date(2024, 3, 5), date(2024, 3, 5), RequestStatus::Approved, 0);
    let approved_b = test_request(&e, RequestType::Vacation, date(2024, 3, 6), date(2024, 3, 7), RequestStatus::Approved, 0);
    let repo = MockRequestRepo::new(vec![pending.clone(), approved_a.clone(), approved_b]);
    let handle = repo.requests_handle();
    let admin = MockAuth::admin().caller();

    let single = DeleteRequestUseCase { repo: repo.clone() };
    single.execute(&admin, approved_a.id).await.unwrap();
    let result = single.execute(&admin, approved_a.id).await;
    assert!(matches!(result, Err(HrServiceError::RequestNotFound)), "got {result:?}");

    let deleted = DeleteApprovedRequestsUseCase { repo }.execute(&admin).await.unwrap();
    assert_eq!(deleted, 1);
    let remaining = handle.lock().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, pending.id);
}

// ── Export ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_export_rows_for_deleted_employee_from_snapshot() {
    let mut kept = test_employee("Mona Adel", "E-7", "RA");
    kept.full_name_localized = Some("منى عادل".into());
    kept.job_position = Some("باحث".into());
    let gone = test_employee("Karim Fathy", "E-9", "RA");
    let wfh = test_request(&kept, RequestType::Wfh, date(2024, 3, 4), date(2024, 3, 4), RequestStatus::Approved, 0);
    let vacation = test_request(&gone, RequestType::Vacation, date(2024, 3, 10), date(2024, 3, 12), RequestStatus::Approved, 0);
    let pending = test_request(&kept, RequestType::Vacation, date(2024, 3, 20), date(2024, 3, 20), RequestStatus::Pending, 0);

    let rows = ApprovedExportUseCase {
        employees: MockEmployeeRepo::new(vec![kept]),
        requests: MockRequestRepo::new(vec![wfh.clone(), vacation.clone(), pending]),
    }
    .execute(&MockAuth::admin().caller())
    .await
    .unwrap();

    assert_eq!(rows.len(), 2);
    // Latest start date first.
    assert_eq!(rows[0].id, vacation.id);
    assert_eq!(rows[0].employee_name, "Karim Fathy");
    assert_eq!(rows[0].code, "E-9");
    assert_eq!(rows[0].fingerprint, "");
    assert_eq!(rows[0].time_off_type, "");
    assert_eq!(rows[0].purpose, "إجازة");

    assert_eq!(rows[1].id, wfh.id);
    assert_eq!(rows[1].employee_name, "منى عادل");
    assert_eq!(rows[1].fingerprint, "FP-E-7");
    assert_eq!(rows[1].job_position, "باحث");
    assert_eq!(rows[1].time_off_type, "ماموريه");
    assert_eq!(rows[1].purpose, "العمل من المنزل");
}
