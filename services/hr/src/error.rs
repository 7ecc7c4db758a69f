use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// HR service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum HrServiceError {
    #[error("missing data")]
    MissingData,
    #[error("invalid request type")]
    InvalidRequestType,
    #[error("invalid request source")]
    InvalidSource,
    #[error("invalid date")]
    InvalidDate,
    #[error("invalid number of days")]
    InvalidNumberOfDays,
    #[error("invalid status")]
    InvalidStatus,
    #[error("no employees selected")]
    NoEmployeesSelected,
    #[error("invalid report")]
    InvalidReport,
    #[error("invalid body: {0}")]
    InvalidBody(String),
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("employee not found")]
    EmployeeNotFound,
    #[error("request not found")]
    RequestNotFound,
    #[error("report not found")]
    ReportNotFound,
    #[error("employee already exists")]
    EmployeeAlreadyExists,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl HrServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingData => "MISSING_DATA",
            Self::InvalidRequestType => "INVALID_REQUEST_TYPE",
            Self::InvalidSource => "INVALID_SOURCE",
            Self::InvalidDate => "INVALID_DATE",
            Self::InvalidNumberOfDays => "INVALID_NUMBER_OF_DAYS",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::NoEmployeesSelected => "NO_EMPLOYEES_SELECTED",
            Self::InvalidReport => "INVALID_REPORT",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::InvalidId(_) => "INVALID_ID",
            Self::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            Self::RequestNotFound => "REQUEST_NOT_FOUND",
            Self::ReportNotFound => "REPORT_NOT_FOUND",
            Self::EmployeeAlreadyExists => "EMPLOYEE_ALREADY_EXISTS",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for HrServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingData
            | Self::InvalidRequestType
            | Self::InvalidSource
            | Self::InvalidDate
            | Self::InvalidNumberOfDays
            | Self::InvalidStatus
            | Self::NoEmployeesSelected
            | Self::InvalidReport
            | Self::InvalidBody(_)
            | Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::EmployeeNotFound | Self::RequestNotFound | Self::ReportNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::EmployeeAlreadyExists => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
