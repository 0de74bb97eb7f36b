//! Pre-notification (health certificate) records supplied by the
//! notification system. Read-only input to a derivation run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::codes::CertificateType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Notification number, e.g. `CHEDA.GB.2025.1234567`.
    pub reference_number: String,
    pub certificate_type: CertificateType,
    #[serde(default)]
    pub version: Option<u32>,
    pub status: NotificationStatus,
    #[serde(default)]
    pub part_two: Option<PartTwo>,
    #[serde(default)]
    pub commodities: Vec<NotificationCommodity>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Draft,
    Submitted,
    InProgress,
    Amend,
    Validated,
    Rejected,
    PartiallyRejected,
    Cancelled,
    Deleted,
    Replaced,
    SplitConsignment,
}

impl NotificationStatus {
    /// Statuses for which the border inspection has not reached a decision yet.
    pub fn is_pending(self) -> bool {
        matches!(
            self,
            NotificationStatus::Draft
                | NotificationStatus::Submitted
                | NotificationStatus::InProgress
        )
    }
}

/// Part two of a notification: the border control post's assessment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartTwo {
    #[serde(default)]
    pub decision: Option<ConsignmentDecision>,
    #[serde(default)]
    pub not_acceptable_action: Option<NotAcceptableAction>,
    #[serde(default)]
    pub inspection_required: Option<InspectionRequired>,
    #[serde(default)]
    pub iuu: Option<IuuControl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsignmentDecision {
    AcceptableForInternalMarket,
    AcceptableForTranshipment,
    AcceptableForTransit,
    AcceptableForTemporaryImport,
    AcceptableForSpecificWarehouse,
    AcceptableIfChanneled,
    HorseReEntry,
    NonAcceptable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotAcceptableAction {
    Euthanasia,
    Slaughter,
    Reexport,
    Redispatching,
    Destruction,
    Transformation,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionRequired {
    Required,
    Inconclusive,
    NotRequired,
}

/// Illegal, unreported and unregulated fishing control recorded on a
/// CHED-P notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IuuControl {
    pub check_required: bool,
    #[serde(default)]
    pub option: Option<IuuOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IuuOption {
    Compliant,
    NotCompliant,
    NotApplicable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationCommodity {
    pub commodity_code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub net_weight: Option<Decimal>,
}
