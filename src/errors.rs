use action_wait::WaitError;
use authoring_core_types::DomError;
use dialog_fields::DialogError;
use parsys_gate::ParsysError;
use thiserror::Error;

/// Any failure surfaced through [`crate::AuthoringConsole`].
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("no parsys with data path `{0}` on the page")]
    ParsysNotFound(String),

    #[error(transparent)]
    Parsys(#[from] ParsysError),

    #[error(transparent)]
    Dialog(#[from] DialogError),

    #[error(transparent)]
    Wait(#[from] WaitError),

    #[error(transparent)]
    Dom(#[from] DomError),
}

impl ConsoleError {
    /// Whether repeating the operation may succeed once the console settles.
    pub fn is_retryable(&self) -> bool {
        match self {
            ConsoleError::ParsysNotFound(_) => false,
            ConsoleError::Parsys(err) => err.is_retryable(),
            ConsoleError::Dialog(err) => err.is_retryable(),
            ConsoleError::Wait(err) => err.is_transient(),
            ConsoleError::Dom(err) => err.is_retryable(),
        }
    }

    /// Get error severity level (0=low, 1=medium, 2=high)
    pub fn severity(&self) -> u8 {
        match self {
            ConsoleError::ParsysNotFound(_) => 1,
            ConsoleError::Parsys(err) => err.severity(),
            ConsoleError::Dialog(err) => err.severity(),
            ConsoleError::Wait(err) => err.severity(),
            ConsoleError::Dom(err) => err.severity(),
        }
    }
}
