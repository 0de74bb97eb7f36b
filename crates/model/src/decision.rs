//! Clearance decision types: the per-check outcome records produced during
//! one derivation run and the persisted decision they fold into.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::codes::{DecisionCode, InternalCode};

/// Result of resolving one check against one (document, notification)
/// pairing. Lives only for the duration of a derivation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub mrn: String,
    pub item_number: u32,
    /// Empty when no document qualified for the check.
    #[serde(default)]
    pub document_reference: Option<String>,
    #[serde(default)]
    pub document_code: Option<String>,
    pub check_code: String,
    /// Notification linked to the check, if one matched.
    #[serde(default)]
    pub notification_reference: Option<String>,
    pub decision_code: DecisionCode,
    #[serde(default)]
    pub internal_code: Option<InternalCode>,
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// A clearance decision for one declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Decision {
    /// Marker identifying the inputs the decision was derived from.
    #[serde(default)]
    pub source_version: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created: Option<OffsetDateTime>,
    #[serde(default)]
    pub items: Vec<DecisionItem>,
    /// Flat list of every outcome folded into `items`.
    #[serde(default)]
    pub results: Option<Vec<DecisionResult>>,
}

impl Decision {
    pub fn item(&self, item_number: u32) -> Option<&DecisionItem> {
        self.items.iter().find(|i| i.item_number == item_number)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionItem {
    pub item_number: u32,
    #[serde(default)]
    pub checks: Vec<DecisionCheck>,
}

impl DecisionItem {
    pub fn check(&self, check_code: &str) -> Option<&DecisionCheck> {
        self.checks.iter().find(|c| c.check_code == check_code)
    }
}

/// The decision for one check code on one item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionCheck {
    pub check_code: String,
    pub decision_code: DecisionCode,
    #[serde(default)]
    pub decision_reasons: Vec<String>,
    #[serde(default)]
    pub internal_codes: Vec<InternalCode>,
}

/// One persisted result entry, mirroring a [`CheckOutcome`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResult {
    pub item_number: u32,
    #[serde(default)]
    pub import_pre_notification: Option<String>,
    #[serde(default)]
    pub document_reference: Option<String>,
    #[serde(default)]
    pub document_code: Option<String>,
    pub check_code: String,
    pub decision_code: DecisionCode,
    #[serde(default)]
    pub decision_reason: Option<String>,
    #[serde(default)]
    pub internal_code: Option<InternalCode>,
}

impl DecisionResult {
    /// Whether the result was linked to a pre-notification.
    pub fn is_linked(&self) -> bool {
        self.import_pre_notification.is_some()
    }
}

impl From<&CheckOutcome> for DecisionResult {
    fn from(outcome: &CheckOutcome) -> Self {
        DecisionResult {
            item_number: outcome.item_number,
            import_pre_notification: outcome.notification_reference.clone(),
            document_reference: outcome.document_reference.clone(),
            document_code: outcome.document_code.clone(),
            check_code: outcome.check_code.clone(),
            decision_code: outcome.decision_code,
            decision_reason: if outcome.reasons.is_empty() {
                None
            } else {
                Some(outcome.reasons.join(" "))
            },
            internal_code: outcome.internal_code,
        }
    }
}
