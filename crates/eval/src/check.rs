//! Resolution of a single customs check into outcome records.

use std::collections::HashSet;

use clearance_model::{Check, CheckOutcome, Commodity, Declaration, Document, Notification};

use crate::error::EvalError;
use crate::identifiers::{
    certificate_type_for_check, document_identifier, notification_identifier, qualifies_for_check,
};
use crate::pipeline::{Pipeline, ResolutionContext};
use crate::reasons::derive_reasons;
use crate::rule_sets::RuleSets;

/// Runs the rule pipeline for one check over every qualifying
/// (document, notification) pairing on the commodity.
pub struct CheckProcessor<'a> {
    rule_sets: &'a RuleSets,
}

impl<'a> CheckProcessor<'a> {
    pub fn new(rule_sets: &'a RuleSets) -> Self {
        CheckProcessor { rule_sets }
    }

    /// Always yields at least one record. A document matching several
    /// notifications yields one record per notification; a qualifying
    /// document matching none yields an unlinked record carrying its
    /// reference; a check with no qualifying document yields a single record
    /// with no document.
    pub fn process(
        &self,
        declaration: &Declaration,
        notifications: &[Notification],
        commodity: &Commodity,
        check: &Check,
    ) -> Result<Vec<CheckOutcome>, EvalError> {
        let check_code = check.check_code.as_str();
        let certificate_type = certificate_type_for_check(check_code);
        let pipeline = self.rule_sets.pipeline(certificate_type)?;

        let resolve = |notification: Option<&Notification>, document: Option<&Document>| {
            let ctx = ResolutionContext {
                declaration,
                commodity,
                check_code,
                certificate_type,
                notification,
                document,
            };
            record(&pipeline, &ctx)
        };

        let mut outcomes = Vec::new();
        let mut seen = HashSet::new();
        for document in &commodity.documents {
            if !qualifies_for_check(document, check_code) || !seen.insert(document) {
                continue;
            }
            let Some(identifier) =
                document_identifier(&document.document_reference, &document.document_code)
            else {
                continue;
            };

            let before = outcomes.len();
            for notification in notifications
                .iter()
                .filter(|n| notification_identifier(n).as_deref() == Some(identifier.as_str()))
            {
                outcomes.push(resolve(Some(notification), Some(document)));
            }
            if outcomes.len() == before {
                outcomes.push(resolve(None, Some(document)));
            }
        }
        if outcomes.is_empty() {
            outcomes.push(resolve(None, None));
        }

        // Orphan check codes carry their detail code and no reason text.
        if certificate_type.is_some() {
            let reasons = outcomes
                .iter()
                .map(|outcome| derive_reasons(declaration, commodity, outcome, &outcomes))
                .collect::<Result<Vec<_>, _>>()?;
            for (outcome, reasons) in outcomes.iter_mut().zip(reasons) {
                outcome.reasons = reasons;
            }
        }

        Ok(outcomes)
    }
}

fn record(pipeline: &Pipeline<'_>, ctx: &ResolutionContext<'_>) -> CheckOutcome {
    let outcome = pipeline.resolve(ctx);
    tracing::debug!(
        mrn = %ctx.declaration.mrn,
        item = ctx.commodity.item_number,
        check = ctx.check_code,
        notification = ctx.notification.map(|n| n.reference_number.as_str()),
        decision = %outcome.decision_code,
        "check resolved"
    );
    CheckOutcome {
        mrn: ctx.declaration.mrn.clone(),
        item_number: ctx.commodity.item_number,
        document_reference: ctx.document.map(|d| d.document_reference.clone()),
        document_code: ctx.document.map(|d| d.document_code.clone()),
        check_code: ctx.check_code.to_string(),
        notification_reference: ctx.notification.map(|n| n.reference_number.clone()),
        decision_code: outcome.decision_code,
        internal_code: outcome.internal_code,
        reasons: Vec::new(),
    }
}
