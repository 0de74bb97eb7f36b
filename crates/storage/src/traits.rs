use async_trait::async_trait;
use clearance_model::{Decision, Notification};

use crate::error::StorageError;
use crate::record::{DecisionWriteRecord, DeclarationRecord};

/// The storage seam between decision derivation and the systems holding
/// declarations, notifications and decisions.
///
/// ## OCC Conflict Detection
///
/// `write_decision` is conditional on the stored decision's source-version
/// marker still being `expected_version` (`None` meaning no decision stored
/// yet). On mismatch the method returns
/// `Err(StorageError::ConcurrentConflict { .. })` and stores nothing.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync + 'static` so one store can be
/// shared across async tasks.
#[async_trait]
pub trait DecisionStore: Send + Sync + 'static {
    /// Read a declaration and the marker of its stored decision.
    ///
    /// Returns `Err(StorageError::DeclarationNotFound)` for an unknown MRN.
    async fn fetch_declaration(&self, mrn: &str) -> Result<DeclarationRecord, StorageError>;

    /// Notifications linked to the declaration. Empty when none are linked.
    async fn list_notifications(&self, mrn: &str) -> Result<Vec<Notification>, StorageError>;

    /// Replace the declaration's decision.
    async fn write_decision(
        &self,
        mrn: &str,
        decision: Decision,
        expected_version: Option<&str>,
    ) -> Result<DecisionWriteRecord, StorageError>;
}
