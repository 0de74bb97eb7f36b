//! clearance-model: shared types for clearance decision derivation.
//!
//! Declarations and notifications are the inputs of a derivation run,
//! check outcomes are its intermediate records, and decisions are what
//! gets persisted. Every type round-trips through serde so the storage
//! seam and the CLI can exchange them as JSON.

pub mod codes;
pub mod decision;
pub mod declaration;
pub mod load;
pub mod notification;

pub use codes::{CertificateType, DecisionCode, InternalCode};
pub use decision::{CheckOutcome, Decision, DecisionCheck, DecisionItem, DecisionResult};
pub use declaration::{
    Check, Commodity, Declaration, DeclarationContext, Document, FinalState, Finalisation,
};
pub use load::{context_from_json, decision_from_json, ModelError};
pub use notification::{
    ConsignmentDecision, InspectionRequired, IuuControl, IuuOption, NotAcceptableAction,
    Notification, NotificationCommodity, NotificationStatus, PartTwo,
};
