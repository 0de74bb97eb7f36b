//! Rule implementations plugged into the pipeline.
//!
//! - `structural`: short-circuits on linkage and status conditions; shared
//!   by every certificate type and always ordered first.
//! - `decisions`: certificate-type decision rules and the illegal-fishing
//!   check.
//! - `commodity`: cross-checks of the declared commodity against the
//!   notification; always ordered last.

mod commodity;
mod decisions;
mod structural;

pub use commodity::{CommodityCodeRule, WeightToleranceRule};
pub use decisions::{
    ChedADecisionRule, ChedDDecisionRule, ChedPDecisionRule, ChedPPDecisionRule, IuuCheckRule,
};
pub use structural::{
    AmendmentRule, InspectionRequiredRule, MissingSupportingDataRule, NotificationStatusRule,
    OrphanCheckCodeRule, TerminalDeclarationRule, UnlinkedNotificationRule,
    WrongCertificateTypeRule,
};
