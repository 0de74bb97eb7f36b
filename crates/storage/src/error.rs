/// All errors that can be returned by a DecisionStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Optimistic concurrency control conflict: the stored decision's
    /// source-version marker is not the one the writer derived from.
    #[error(
        "concurrent conflict on declaration {mrn}: expected decision version {}, found {}",
        .expected.as_deref().unwrap_or("<none>"),
        .actual.as_deref().unwrap_or("<none>")
    )]
    ConcurrentConflict {
        mrn: String,
        expected: Option<String>,
        actual: Option<String>,
    },

    /// No declaration is stored under the MRN.
    #[error("declaration not found: {mrn}")]
    DeclarationNotFound { mrn: String },

    /// A backend-specific storage error (connection, serialization, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}
