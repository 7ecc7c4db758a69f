use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use hrdesk_core::health::{db_ready, healthz};
use hrdesk_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    employee::{add_employee, delete_employee, get_employee, list_employees, update_employee},
    profile::{get_me, update_me},
    random_wfh::assign_random_wfh,
    report::{create_report, delete_report, get_report, list_reports, report_stats},
    request::{
        create_admin_request, create_request, delete_approved_requests, delete_request,
        export_approved_requests, list_my_requests, list_requests, update_request_status,
    },
    schedule::{my_week, weekly_grid},
};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    db_ready(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Requests
        .route("/requests", get(list_requests).post(create_request))
        .route("/requests/my", get(list_my_requests))
        .route("/requests/week", get(my_week))
        .route("/requests/weekly-wfh", get(weekly_grid))
        .route("/requests/approved", get(export_approved_requests))
        .route("/requests/admin", post(create_admin_request))
        .route("/requests/random-wfh", post(assign_random_wfh))
        .route("/requests/all", delete(delete_approved_requests))
        .route(
            "/requests/{id}",
            patch(update_request_status).delete(delete_request),
        )
        // Employees
        .route("/employees", get(list_employees).post(add_employee))
        .route(
            "/employees/{id}",
            get(get_employee)
                .patch(update_employee)
                .delete(delete_employee),
        )
        // Profile
        .route("/users/@me", get(get_me).patch(update_me))
        // Reports
        .route("/reports", get(list_reports).post(create_report))
        .route("/reports/stats", get(report_stats))
        .route("/reports/{id}", get(get_report).delete(delete_report))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
