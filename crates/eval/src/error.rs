use clearance_model::CertificateType;
use clearance_storage::StorageError;

/// Errors that abort a derivation call.
///
/// Malformed evidence never surfaces here; it is treated as absent. These
/// variants indicate a mismatch between rules configuration and the data.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// The rule sets carry no entry for a certificate type.
    #[error("no rule set configured for certificate type {0}")]
    MissingRuleSet(CertificateType),

    /// A check code outside every certificate family reached a step that
    /// needs its family.
    #[error("check code '{check_code}' is out of range: no certificate type")]
    CheckCodeOutOfRange { check_code: String },

    /// The storage collaborator failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
