use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::{TestRequest, TestServer};
use chrono_tz::Tz;
use sea_orm::DatabaseConnection;
use serde_json::json;

use hrdesk_domain::team::TeamDirectory;
use hrdesk_hr::router::build_router;
use hrdesk_hr::state::AppState;
use hrdesk_testing::auth::MockAuth;

/// Server with no database behind it; only paths that fail before touching
/// storage can be exercised.
fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        work_timezone: Tz::UTC,
        teams: Arc::new(TeamDirectory::default()),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn as_caller(request: TestRequest, auth: &MockAuth) -> TestRequest {
    auth.header_pairs()
        .into_iter()
        .fold(request, |req, (name, value)| req.add_header(name, value))
}

#[tokio::test]
async fn should_report_liveness_and_readiness() {
    let server = server();
    let response = server.get("/healthz").await;
    response.assert_status_ok();
    assert!(response.headers().contains_key("x-request-id"));
    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_reject_requests_without_gateway_headers() {
    let server = server();
    for path in ["/requests/my", "/requests/week", "/employees", "/users/@me", "/reports"] {
        server
            .get(path)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn should_forbid_admin_routes_to_employees() {
    let server = server();
    let employee = MockAuth::employee();

    let response = as_caller(server.get("/requests"), &employee).await;
    response.assert_status(StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "FORBIDDEN");

    as_caller(server.delete("/requests/all"), &employee)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    as_caller(server.get("/requests/approved"), &employee)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    as_caller(
        server
            .post("/requests/random-wfh")
            .json(&json!({ "selectedEmployeeIds": ["x"], "numberOfDaysPerEmployee": 2 })),
        &employee,
    )
    .await
    .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_empty_random_wfh_selection() {
    let server = server();
    let response = as_caller(
        server
            .post("/requests/random-wfh")
            .json(&json!({ "selectedEmployeeIds": [], "numberOfDaysPerEmployee": 2 })),
        &MockAuth::admin(),
    )
    .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "NO_EMPLOYEES_SELECTED");
}

#[tokio::test]
async fn should_reject_bad_status_before_lookup() {
    let server = server();
    let response = as_caller(
        server
            .patch(&format!("/requests/{}", uuid::Uuid::now_v7()))
            .json(&json!({ "status": "Done" })),
        &MockAuth::admin(),
    )
    .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_STATUS");
}

#[tokio::test]
async fn should_reject_wrongly_typed_body_as_json_error() {
    let server = server();
    let response = as_caller(
        server.post("/requests").json(&json!({
            "type": "VACATION",
            "startDate": "2024-03-04",
            "endDate": "2024-03-06",
            "numberOfDays": "1",
        })),
        &MockAuth::employee(),
    )
    .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_BODY");
    assert!(body["message"].as_str().unwrap().contains("numberOfDays"));

    let response = as_caller(
        server
            .post("/requests/random-wfh")
            .json(&json!({ "selectedEmployeeIds": "everyone" })),
        &MockAuth::admin(),
    )
    .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_BODY");
}

#[tokio::test]
async fn should_reject_malformed_id_as_json_error() {
    let server = server();
    let admin = MockAuth::admin();

    let response = as_caller(
        server
            .patch("/requests/not-a-uuid")
            .json(&json!({ "status": "Approved" })),
        &admin,
    )
    .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_ID");

    for path in ["/requests/42", "/employees/42", "/reports/42"] {
        let response = as_caller(server.delete(path), &admin).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["kind"], "INVALID_ID", "for {path}");
    }
}
