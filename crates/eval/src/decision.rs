//! Folding outcome records into decisions, and the orchestrator that runs
//! every check of every declaration in a context.

use std::collections::BTreeMap;

use clearance_model::{
    CheckOutcome, Decision, DecisionCheck, DecisionCode, DecisionItem, DecisionResult,
    Declaration, DeclarationContext, Notification,
};
use serde_json::json;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

use crate::check::CheckProcessor;
use crate::error::EvalError;
use crate::rule_sets::RuleSets;

// ──────────────────────────────────────────────
// Decision builder
// ──────────────────────────────────────────────

/// Shapes the outcome records of one declaration into a [`Decision`].
pub trait DecisionBuilder: Send + Sync {
    fn build(
        &self,
        declaration: &Declaration,
        notifications: &[Notification],
        outcomes: &[CheckOutcome],
    ) -> Decision;
}

/// Groups outcomes by item then check code, keeping the most severe
/// decision code per check.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardDecisionBuilder;

impl DecisionBuilder for StandardDecisionBuilder {
    fn build(
        &self,
        declaration: &Declaration,
        notifications: &[Notification],
        outcomes: &[CheckOutcome],
    ) -> Decision {
        let mut grouped: BTreeMap<u32, BTreeMap<&str, Vec<&CheckOutcome>>> = BTreeMap::new();
        for outcome in outcomes {
            grouped
                .entry(outcome.item_number)
                .or_default()
                .entry(outcome.check_code.as_str())
                .or_default()
                .push(outcome);
        }

        let items = grouped
            .into_iter()
            .map(|(item_number, checks)| DecisionItem {
                item_number,
                checks: checks
                    .into_iter()
                    .map(|(check_code, outcomes)| fold_check(check_code, &outcomes))
                    .collect(),
            })
            .collect();

        Decision {
            source_version: Some(source_version(declaration, notifications, outcomes)),
            created: Some(OffsetDateTime::now_utc()),
            items,
            results: Some(outcomes.iter().map(DecisionResult::from).collect()),
        }
    }
}

fn fold_check(check_code: &str, outcomes: &[&CheckOutcome]) -> DecisionCheck {
    let decision_code = outcomes
        .iter()
        .map(|o| o.decision_code)
        .max_by_key(|code| code.severity())
        .unwrap_or(DecisionCode::X00);

    let mut decision_reasons: Vec<String> = Vec::new();
    let mut internal_codes = Vec::new();
    for outcome in outcomes {
        for reason in &outcome.reasons {
            if !decision_reasons.contains(reason) {
                decision_reasons.push(reason.clone());
            }
        }
        if let Some(code) = outcome.internal_code {
            if !internal_codes.contains(&code) {
                internal_codes.push(code);
            }
        }
    }

    DecisionCheck {
        check_code: check_code.to_string(),
        decision_code,
        decision_reasons,
        internal_codes,
    }
}

/// SHA-256 over everything the decision was derived from: the declaration
/// without its stored decision, each notification an outcome links to, and
/// the outcome records themselves.
///
/// Equal markers imply equal results, so the same-decision relation may
/// trust them even when version fields are absent.
fn source_version(
    declaration: &Declaration,
    notifications: &[Notification],
    outcomes: &[CheckOutcome],
) -> String {
    let consulted: BTreeMap<&str, Option<&Notification>> = outcomes
        .iter()
        .filter_map(|o| o.notification_reference.as_deref())
        .map(|reference| {
            let notification = notifications
                .iter()
                .find(|n| n.reference_number == reference);
            (reference, notification)
        })
        .collect();

    let canonical = json!({
        "mrn": declaration.mrn,
        "version": declaration.version,
        "finalisation": declaration.finalisation,
        "commodities": declaration.commodities,
        "notifications": consulted,
        "outcomes": outcomes,
    });
    let hash = Sha256::digest(canonical.to_string().as_bytes());
    format!("{:x}", hash)
}

// ──────────────────────────────────────────────
// Orchestrator
// ──────────────────────────────────────────────

/// Derives one decision per declaration in a context.
pub struct DecisionOrchestrator<'a, B = StandardDecisionBuilder> {
    rule_sets: &'a RuleSets,
    builder: B,
}

impl<'a> DecisionOrchestrator<'a> {
    pub fn new(rule_sets: &'a RuleSets) -> Self {
        DecisionOrchestrator {
            rule_sets,
            builder: StandardDecisionBuilder,
        }
    }
}

impl<'a, B: DecisionBuilder> DecisionOrchestrator<'a, B> {
    pub fn with_builder(rule_sets: &'a RuleSets, builder: B) -> Self {
        DecisionOrchestrator { rule_sets, builder }
    }

    /// `(mrn, decision)` pairs in input order.
    pub fn process(
        &self,
        context: &DeclarationContext,
    ) -> Result<Vec<(String, Decision)>, EvalError> {
        context
            .declarations
            .iter()
            .map(|declaration| {
                let decision = self.derive(declaration, &context.notifications)?;
                Ok((declaration.mrn.clone(), decision))
            })
            .collect()
    }

    /// Decision for a single declaration.
    pub fn derive(
        &self,
        declaration: &Declaration,
        notifications: &[Notification],
    ) -> Result<Decision, EvalError> {
        let processor = CheckProcessor::new(self.rule_sets);
        let mut outcomes = Vec::new();
        for commodity in &declaration.commodities {
            for check in &commodity.checks {
                outcomes.extend(processor.process(declaration, notifications, commodity, check)?);
            }
        }

        let decision = self.builder.build(declaration, notifications, &outcomes);
        tracing::info!(
            mrn = %declaration.mrn,
            items = decision.items.len(),
            outcomes = outcomes.len(),
            "decision derived"
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearance_model::InternalCode;

    fn outcome(item: u32, check: &str, code: DecisionCode, reason: Option<&str>) -> CheckOutcome {
        CheckOutcome {
            mrn: "25GB0000000000001".to_string(),
            item_number: item,
            document_reference: None,
            document_code: None,
            check_code: check.to_string(),
            notification_reference: None,
            decision_code: code,
            internal_code: (code == DecisionCode::X00).then_some(InternalCode::E70),
            reasons: reason.map(|r| vec![r.to_string()]).unwrap_or_default(),
        }
    }

    fn declaration() -> Declaration {
        Declaration {
            mrn: "25GB0000000000001".to_string(),
            version: Some(3),
            finalisation: None,
            commodities: vec![],
            decision: None,
        }
    }

    #[test]
    fn most_severe_code_wins_per_check() {
        let outcomes = vec![
            outcome(1, "H221", DecisionCode::C03, None),
            outcome(1, "H221", DecisionCode::X00, Some("not linked")),
            outcome(1, "H221", DecisionCode::X00, Some("not linked")),
            outcome(2, "H222", DecisionCode::H01, None),
            outcome(2, "H222", DecisionCode::N04, None),
        ];
        let decision = StandardDecisionBuilder.build(&declaration(), &[], &outcomes);

        let check = decision.item(1).and_then(|i| i.check("H221")).unwrap();
        assert_eq!(check.decision_code, DecisionCode::X00);
        assert_eq!(check.decision_reasons, vec!["not linked".to_string()]);
        assert_eq!(check.internal_codes, vec![InternalCode::E70]);

        let check = decision.item(2).and_then(|i| i.check("H222")).unwrap();
        assert_eq!(check.decision_code, DecisionCode::N04);
        assert_eq!(decision.results.as_ref().map(Vec::len), Some(5));
    }

    #[test]
    fn source_version_tracks_declaration_version() {
        let outcomes = vec![outcome(1, "H221", DecisionCode::C03, None)];
        let first = StandardDecisionBuilder.build(&declaration(), &[], &outcomes);
        let again = StandardDecisionBuilder.build(&declaration(), &[], &outcomes);
        assert_eq!(first.source_version, again.source_version);

        let mut bumped = declaration();
        bumped.version = Some(4);
        let changed = StandardDecisionBuilder.build(&bumped, &[], &outcomes);
        assert_ne!(first.source_version, changed.source_version);
    }

    #[test]
    fn source_version_changes_with_unversioned_inputs() {
        use clearance_model::{CertificateType, NotificationStatus};

        let mut notification = Notification {
            reference_number: "CHEDA.GB.2025.1234567".to_string(),
            certificate_type: CertificateType::ChedA,
            version: None,
            status: NotificationStatus::InProgress,
            part_two: None,
            commodities: vec![],
            updated: None,
        };
        let mut declaration = declaration();
        declaration.version = None;
        let mut linked = outcome(1, "H221", DecisionCode::H01, None);
        linked.notification_reference = Some(notification.reference_number.clone());

        let held = StandardDecisionBuilder.build(
            &declaration,
            std::slice::from_ref(&notification),
            std::slice::from_ref(&linked),
        );
        notification.status = NotificationStatus::Validated;
        let same_outcome = StandardDecisionBuilder.build(
            &declaration,
            std::slice::from_ref(&notification),
            std::slice::from_ref(&linked),
        );
        assert_ne!(held.source_version, same_outcome.source_version);

        linked.decision_code = DecisionCode::C03;
        let released = StandardDecisionBuilder.build(
            &declaration,
            std::slice::from_ref(&notification),
            std::slice::from_ref(&linked),
        );
        assert_ne!(same_outcome.source_version, released.source_version);
    }

    #[test]
    fn orchestrator_preserves_declaration_order() {
        let rule_sets = RuleSets::default();
        let mut second = declaration();
        second.mrn = "25GB0000000000002".to_string();
        let context = DeclarationContext {
            declarations: vec![second, declaration()],
            notifications: vec![],
        };

        let decisions = DecisionOrchestrator::new(&rule_sets)
            .process(&context)
            .unwrap();
        let mrns: Vec<_> = decisions.iter().map(|(mrn, _)| mrn.as_str()).collect();
        assert_eq!(mrns, vec!["25GB0000000000002", "25GB0000000000001"]);
    }
}
