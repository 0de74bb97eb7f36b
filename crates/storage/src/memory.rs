//! In-memory `DecisionStore` for tests and the command line.

use std::collections::BTreeMap;

use async_trait::async_trait;
use clearance_model::{Decision, Declaration, DeclarationContext, Notification};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::record::{DecisionWriteRecord, DeclarationRecord, StoreSeed};
use crate::traits::DecisionStore;

#[derive(Debug, Default)]
struct Tables {
    declarations: BTreeMap<String, Declaration>,
    notifications: BTreeMap<String, Vec<Notification>>,
    writes: Vec<DecisionWriteRecord>,
}

/// A `DecisionStore` holding everything behind one `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding every declaration in `context`, each linked to all of
    /// the context's notifications.
    pub fn from_context(context: DeclarationContext) -> Self {
        Self::from_seed(StoreSeed {
            declarations: context.declarations,
            notifications: context.notifications,
        })
    }

    pub fn from_seed(seed: StoreSeed) -> Self {
        let mut tables = Tables::default();
        for declaration in seed.declarations {
            tables
                .notifications
                .insert(declaration.mrn.clone(), seed.notifications.clone());
            tables
                .declarations
                .insert(declaration.mrn.clone(), declaration);
        }
        InMemoryStore {
            tables: RwLock::new(tables),
        }
    }

    /// Insert or replace a declaration and its linked notifications.
    pub async fn insert_declaration(
        &self,
        declaration: Declaration,
        notifications: Vec<Notification>,
    ) {
        let mut tables = self.tables.write().await;
        tables
            .notifications
            .insert(declaration.mrn.clone(), notifications);
        tables
            .declarations
            .insert(declaration.mrn.clone(), declaration);
    }

    /// Everything held, as a context. Notifications linked to several
    /// declarations appear once.
    pub async fn to_context(&self) -> DeclarationContext {
        let tables = self.tables.read().await;
        let mut notifications: Vec<Notification> = Vec::new();
        for linked in tables.notifications.values() {
            for notification in linked {
                if !notifications
                    .iter()
                    .any(|n| n.reference_number == notification.reference_number)
                {
                    notifications.push(notification.clone());
                }
            }
        }
        DeclarationContext {
            declarations: tables.declarations.values().cloned().collect(),
            notifications,
        }
    }

    /// Every accepted write, oldest first.
    pub async fn writes(&self) -> Vec<DecisionWriteRecord> {
        self.tables.read().await.writes.clone()
    }
}

#[async_trait]
impl DecisionStore for InMemoryStore {
    async fn fetch_declaration(&self, mrn: &str) -> Result<DeclarationRecord, StorageError> {
        let tables = self.tables.read().await;
        let declaration = tables
            .declarations
            .get(mrn)
            .cloned()
            .ok_or_else(|| StorageError::DeclarationNotFound {
                mrn: mrn.to_string(),
            })?;
        let decision_version = declaration
            .decision
            .as_ref()
            .and_then(|d| d.source_version.clone());
        Ok(DeclarationRecord {
            declaration,
            decision_version,
        })
    }

    async fn list_notifications(&self, mrn: &str) -> Result<Vec<Notification>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.notifications.get(mrn).cloned().unwrap_or_default())
    }

    async fn write_decision(
        &self,
        mrn: &str,
        decision: Decision,
        expected_version: Option<&str>,
    ) -> Result<DecisionWriteRecord, StorageError> {
        let mut tables = self.tables.write().await;
        let sequence = tables.writes.len() as u64 + 1;

        let declaration =
            tables
                .declarations
                .get_mut(mrn)
                .ok_or_else(|| StorageError::DeclarationNotFound {
                    mrn: mrn.to_string(),
                })?;
        let actual = declaration
            .decision
            .as_ref()
            .and_then(|d| d.source_version.clone());
        if actual.as_deref() != expected_version {
            return Err(StorageError::ConcurrentConflict {
                mrn: mrn.to_string(),
                expected: expected_version.map(str::to_string),
                actual,
            });
        }

        let record = DecisionWriteRecord {
            mrn: mrn.to_string(),
            sequence,
            previous_version: actual,
            source_version: decision.source_version.clone(),
        };
        declaration.decision = Some(decision);
        tables.writes.push(record.clone());
        tracing::debug!(mrn, sequence, "decision stored");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conformance::run_conformance_suite;

    #[tokio::test]
    async fn in_memory_store_passes_conformance() {
        let report = run_conformance_suite(|seed| async move { InMemoryStore::from_seed(seed) }).await;
        assert!(report.failed == 0, "{report}");
        assert!(report.total > 0);
    }

    #[tokio::test]
    async fn insert_replaces_notifications() {
        let store = InMemoryStore::new();
        let declaration = Declaration {
            mrn: "25GB0000000000001".to_string(),
            version: Some(1),
            finalisation: None,
            commodities: vec![],
            decision: None,
        };
        store.insert_declaration(declaration.clone(), vec![]).await;
        store.insert_declaration(declaration, vec![]).await;

        let record = store.fetch_declaration("25GB0000000000001").await.unwrap();
        assert!(record.prior_decision().is_none());
        assert!(store
            .list_notifications("25GB0000000000001")
            .await
            .unwrap()
            .is_empty());
        assert_eq!(store.to_context().await.declarations.len(), 1);
    }

    #[tokio::test]
    async fn written_decision_appears_in_context() {
        let store = InMemoryStore::from_seed(StoreSeed {
            declarations: vec![Declaration {
                mrn: "25GB0000000000001".to_string(),
                version: Some(1),
                finalisation: None,
                commodities: vec![],
                decision: None,
            }],
            notifications: vec![],
        });
        let decision = Decision {
            source_version: Some("abc".to_string()),
            ..Decision::default()
        };
        store
            .write_decision("25GB0000000000001", decision, None)
            .await
            .unwrap();

        let context = store.to_context().await;
        let stored = context.declarations[0].decision.as_ref().unwrap();
        assert_eq!(stored.source_version.as_deref(), Some("abc"));
        assert_eq!(store.writes().await.len(), 1);
    }
}
