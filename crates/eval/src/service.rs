//! Fetch, derive, compare, write.

use clearance_model::Decision;
use clearance_storage::{DecisionStore, DecisionWriteRecord};

use crate::compare::is_same_decision;
use crate::decision::{DecisionBuilder, DecisionOrchestrator, StandardDecisionBuilder};
use crate::error::EvalError;
use crate::rule_sets::RuleSets;

/// What [`DecisionService::derive_and_persist`] did.
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// The derived decision differed from the stored one and was written.
    Written {
        decision: Decision,
        record: DecisionWriteRecord,
    },
    /// The stored decision is already the same decision; nothing was written.
    Unchanged { decision: Decision },
}

impl SyncOutcome {
    pub fn decision(&self) -> &Decision {
        match self {
            SyncOutcome::Written { decision, .. } | SyncOutcome::Unchanged { decision } => decision,
        }
    }

    pub fn was_written(&self) -> bool {
        matches!(self, SyncOutcome::Written { .. })
    }
}

/// Keeps the stored decision of a declaration in step with its inputs.
pub struct DecisionService<S, B = StandardDecisionBuilder> {
    store: S,
    rule_sets: RuleSets,
    builder: B,
}

impl<S: DecisionStore> DecisionService<S> {
    pub fn new(store: S, rule_sets: RuleSets) -> Self {
        DecisionService {
            store,
            rule_sets,
            builder: StandardDecisionBuilder,
        }
    }
}

impl<S: DecisionStore, B: DecisionBuilder + Clone> DecisionService<S, B> {
    pub fn with_builder(store: S, rule_sets: RuleSets, builder: B) -> Self {
        DecisionService {
            store,
            rule_sets,
            builder,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Derive the decision for `mrn` and write it unless the stored decision
    /// is already the same decision.
    ///
    /// The write is conditional on the stored decision's marker being the one
    /// fetched here; a concurrent writer surfaces as
    /// [`clearance_storage::StorageError::ConcurrentConflict`].
    pub async fn derive_and_persist(&self, mrn: &str) -> Result<SyncOutcome, EvalError> {
        let record = self.store.fetch_declaration(mrn).await?;
        let notifications = self.store.list_notifications(mrn).await?;

        let orchestrator =
            DecisionOrchestrator::with_builder(&self.rule_sets, self.builder.clone());
        let decision = orchestrator.derive(&record.declaration, &notifications)?;

        if let Some(prior) = record.prior_decision() {
            if is_same_decision(prior, &decision) {
                tracing::info!(mrn, "decision unchanged, write skipped");
                return Ok(SyncOutcome::Unchanged { decision });
            }
        }

        let write = self
            .store
            .write_decision(mrn, decision.clone(), record.decision_version.as_deref())
            .await?;
        tracing::info!(mrn, sequence = write.sequence, "decision written");
        Ok(SyncOutcome::Written {
            decision,
            record: write,
        })
    }
}
