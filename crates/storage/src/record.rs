use clearance_model::{Decision, Declaration, Notification};
use serde::{Deserialize, Serialize};

/// A declaration as fetched from the backend, with the marker of the
/// decision currently stored against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationRecord {
    pub declaration: Declaration,
    /// `source_version` of the stored decision. `None` when no decision has
    /// been written.
    pub decision_version: Option<String>,
}

impl DeclarationRecord {
    pub fn prior_decision(&self) -> Option<&Decision> {
        self.declaration.decision.as_ref()
    }
}

/// A record of one accepted decision write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionWriteRecord {
    pub mrn: String,
    /// Position in the backend's write log, starting at 1.
    pub sequence: u64,
    pub previous_version: Option<String>,
    pub source_version: Option<String>,
}

/// Data a conformance test needs the backend to hold before it runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSeed {
    pub declarations: Vec<Declaration>,
    /// Notifications linked to every seeded declaration.
    pub notifications: Vec<Notification>,
}
