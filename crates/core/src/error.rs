/// Failure signal for every employee-records operation.
///
/// Each variant carries the human-readable message shown to the user; the
/// variant itself lets callers branch on the kind of failure without parsing
/// the text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A required argument (id, payload) was missing.
    #[error("{0}")]
    Input(String),

    /// A field failed a rule check.
    #[error("{0}")]
    Validation(String),

    /// The operation would break a uniqueness constraint.
    #[error("{0}")]
    Conflict(String),

    /// The targeted record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Storage or encoding failure underneath the store.
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    /// Stable machine-readable code for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::Input(_) => "INPUT_ERROR",
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::Conflict(_) => "CONFLICT",
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The message carried by the error, without any kind prefix.
    pub fn message(&self) -> &str {
        match self {
            CoreError::Input(msg)
            | CoreError::Validation(msg)
            | CoreError::Conflict(msg)
            | CoreError::NotFound(msg)
            | CoreError::Internal(msg) => msg,
        }
    }
}
