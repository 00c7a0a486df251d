use action_wait::WaitError;
use authoring_core_types::DomError;
use dialog_fields::DialogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParsysError {
    #[error("component `{0}` not present in the parsys")]
    ComponentNotFound(String),

    #[error(transparent)]
    Wait(#[from] WaitError),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Dialog(#[from] DialogError),
}

impl ParsysError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ParsysError::Wait(err) if err.is_timeout())
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            ParsysError::ComponentNotFound(_) => false,
            ParsysError::Wait(err) => err.is_transient(),
            ParsysError::Dom(err) => err.is_retryable(),
            ParsysError::Dialog(err) => err.is_retryable(),
        }
    }

    /// Get error severity level (0=low, 1=medium, 2=high)
    pub fn severity(&self) -> u8 {
        match self {
            ParsysError::ComponentNotFound(_) => 1,
            ParsysError::Wait(err) => err.severity(),
            ParsysError::Dom(err) => err.severity(),
            ParsysError::Dialog(err) => err.severity(),
        }
    }
}
