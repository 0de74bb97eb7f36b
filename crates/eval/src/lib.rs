//! Clearance decision derivation -- accepts declarations + notifications,
//! produces per-check decisions.
//!
//! Each check on a declared commodity is resolved by an ordered rule
//! pipeline selected by the check's certificate type. The resulting outcome
//! records are folded into one decision per declaration. Document matching
//! is available on its own for diagnostics.

pub mod check;
pub mod compare;
pub mod decision;
pub mod error;
pub mod identifiers;
pub mod matching;
pub mod pipeline;
pub mod reasons;
pub mod rule_sets;
pub mod rules;
pub mod service;

pub use check::CheckProcessor;
pub use compare::{
    is_same_decision, item_exists, items_exist, result_exists, ExistingItem, ExistingResult,
    SameDecision,
};
pub use decision::{DecisionBuilder, DecisionOrchestrator, StandardDecisionBuilder};
pub use error::EvalError;
pub use matching::{match_documents, DocumentMatch, DocumentNoMatch, MatchResult};
pub use pipeline::{Next, Outcome, Pipeline, ResolutionContext, Rule};
pub use reasons::derive_reasons;
pub use rule_sets::{RuleConfig, RuleSets};
pub use service::{DecisionService, SyncOutcome};

use clearance_model::{Decision, DeclarationContext};

/// Derive one decision per declaration in `context`.
///
/// This is the top-level public API for derivation. Persisting the result
/// is left to the caller; see [`DecisionService`] for the fetch, compare and
/// write cycle.
///
/// # Arguments
/// * `context` - Declarations and the notifications they may reference
/// * `rule_sets` - Rule pipelines per certificate type
///
/// # Returns
/// * `(mrn, decision)` pairs in declaration order, or an `EvalError` when
///   the rule sets do not cover a certificate type
pub fn derive_decisions(
    context: &DeclarationContext,
    rule_sets: &RuleSets,
) -> Result<Vec<(String, Decision)>, EvalError> {
    DecisionOrchestrator::new(rule_sets).process(context)
}
