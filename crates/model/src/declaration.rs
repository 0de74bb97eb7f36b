//! Customs declaration types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decision::Decision;
use crate::notification::Notification;

/// Input to one derivation run: the declarations to decide and every
/// notification that may apply to them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeclarationContext {
    #[serde(default)]
    pub declarations: Vec<Declaration>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// A customs declaration identified by its movement reference number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Declaration {
    pub mrn: String,
    /// Version of the declaration as last received from customs.
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub finalisation: Option<Finalisation>,
    #[serde(default)]
    pub commodities: Vec<Commodity>,
    /// Decision persisted by a previous run, if any.
    #[serde(default)]
    pub decision: Option<Decision>,
}

impl Declaration {
    /// True when customs finalised the declaration as cancelled or destroyed.
    pub fn is_terminal(&self) -> bool {
        self.finalisation
            .as_ref()
            .map(|f| f.final_state.is_terminal())
            .unwrap_or(false)
    }
}

/// Customs finalisation of a declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finalisation {
    pub final_state: FinalState,
    #[serde(default)]
    pub is_manual_release: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalState {
    Cleared,
    CancelledAfterArrival,
    CancelledWhilePreLodged,
    Destroyed,
    Seized,
    ReleasedToKingsWarehouse,
    TransferredToMss,
}

impl FinalState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            FinalState::CancelledAfterArrival
                | FinalState::CancelledWhilePreLodged
                | FinalState::Destroyed
        )
    }
}

/// One item line of a declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commodity {
    pub item_number: u32,
    #[serde(default)]
    pub commodity_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub net_mass: Option<Decimal>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub checks: Vec<Check>,
}

/// A document reference declared against a commodity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Document {
    pub document_code: String,
    #[serde(default)]
    pub document_reference: String,
}

/// A regulatory check required on a commodity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub check_code: String,
}
