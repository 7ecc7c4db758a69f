//! Leave / WFH request enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

/// Kind of absence or permission an employee asks for.
///
/// Wire format: `"WFH"`, `"VACATION"`, `"LATE_PERMISSION"`, `"EARLY_LEAVE"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    Wfh,
    Vacation,
    LatePermission,
    EarlyLeave,
}

impl RequestType {
    pub const ALL: [Self; 4] = [
        Self::Wfh,
        Self::Vacation,
        Self::LatePermission,
        Self::EarlyLeave,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wfh => "WFH",
            Self::Vacation => "VACATION",
            Self::LatePermission => "LATE_PERMISSION",
            Self::EarlyLeave => "EARLY_LEAVE",
        }
    }

    /// Label shown on the weekly grid when a request has neither notes nor reason.
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Wfh => "Work From Home",
            Self::Vacation => "Vacation",
            Self::LatePermission => "Late Permission",
            Self::EarlyLeave => "Early Leave",
        }
    }

    /// Category column of the HR form export (Arabic).
    pub fn hr_category(self) -> &'static str {
        match self {
            Self::Wfh => "العمل من المنزل",
            Self::Vacation => "إجازة",
            Self::LatePermission => "اذن تاخير",
            Self::EarlyLeave => "انصراف مبكر",
        }
    }

    /// Time-off type column of the HR form export. Only WFH is filed as a mission.
    pub fn hr_time_off_type(self) -> &'static str {
        match self {
            Self::Wfh => "ماموريه",
            _ => "",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("request type", s))
    }
}

/// Approval state of a request. Any state may be set to any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            other => Err(UnknownVariant::new("request status", other)),
        }
    }
}

/// Who filed a request: the employee themselves or an admin on their behalf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestSource {
    #[default]
    EmployeeRequest,
    AdminDirect,
}

impl RequestSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmployeeRequest => "EMPLOYEE_REQUEST",
            Self::AdminDirect => "ADMIN_DIRECT",
        }
    }
}

impl fmt::Display for RequestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestSource {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMPLOYEE_REQUEST" => Ok(Self::EmployeeRequest),
            "ADMIN_DIRECT" => Ok(Self::AdminDirect),
            other => Err(UnknownVariant::new("request source", other)),
        }
    }
}

/// Initial status of a newly filed request.
///
/// First match wins: admin-direct requests are approved; a self-service WFH
/// request that already carries `"Approved"` is approved (legacy clients
/// auto-approve WFH); everything else starts pending.
pub fn initial_status(
    source: RequestSource,
    request_type: RequestType,
    requested_status: Option<&str>,
) -> RequestStatus {
    match source {
        RequestSource::AdminDirect => RequestStatus::Approved,
        RequestSource::EmployeeRequest
            if request_type == RequestType::Wfh && requested_status == Some("Approved") =>
        {
            RequestStatus::Approved
        }
        RequestSource::EmployeeRequest => RequestStatus::Pending,
    }
}
