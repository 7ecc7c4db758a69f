//! Diagnostic report enums.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(UnknownVariant::new($kind, other)),
                }
            }
        }
    };
}

wire_enum!(
    /// Patient gender as recorded on the scan request.
    Gender, "gender", {
        Male => "male",
        Female => "female",
    }
);

wire_enum!(
    /// Imaging modality.
    ScanType, "scan type", {
        Xray => "xray",
        Ct => "ct",
        Mri => "mri",
        Ecg => "ecg",
    }
);

wire_enum!(
    /// Overall finding of a report.
    ReportStatus, "report status", {
        Normal => "normal",
        Abnormal => "abnormal",
        Critical => "critical",
    }
);

wire_enum!(
    RiskLevel, "risk level", {
        Low => "Low",
        Moderate => "Moderate",
        High => "High",
    }
);
