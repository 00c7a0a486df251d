use action_wait::WaitError;
use authoring_core_types::DomError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("there are no `{tag}` fields in the scope")]
    NoFieldsInScope { tag: String },

    #[error("dialog field `{tag}` labelled `{label}` not found")]
    FieldNotFound { tag: String, label: String },

    #[error("no handler registered for field type `{0}`")]
    UnknownFieldType(String),

    #[error("field `{tag}` expects {expected}")]
    UnexpectedValue { tag: String, expected: &'static str },

    #[error(transparent)]
    Wait(#[from] WaitError),

    #[error(transparent)]
    Dom(#[from] DomError),
}

impl DialogError {
    /// Lookup failures describe the dialog as it is; retrying cannot change them.
    pub fn is_retryable(&self) -> bool {
        match self {
            DialogError::Wait(err) => err.is_transient(),
            DialogError::Dom(err) => err.is_retryable(),
            _ => false,
        }
    }

    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            DialogError::NoFieldsInScope { .. }
                | DialogError::FieldNotFound { .. }
                | DialogError::UnknownFieldType(_)
        )
    }

    /// Get error severity level (0=low, 1=medium, 2=high)
    pub fn severity(&self) -> u8 {
        match self {
            DialogError::UnknownFieldType(_) | DialogError::UnexpectedValue { .. } => 2,
            DialogError::NoFieldsInScope { .. } | DialogError::FieldNotFound { .. } => 1,
            DialogError::Wait(err) => err.severity(),
            DialogError::Dom(err) => err.severity(),
        }
    }
}
