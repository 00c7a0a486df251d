//! Error types for condition polling

use std::time::Duration;

use authoring_core_types::DomError;
use thiserror::Error;

/// Failures surfaced by [`crate::Conditions`].
#[derive(Debug, Error, Clone)]
pub enum WaitError {
    /// Polled condition never held within its budget
    #[error("condition `{condition}` not met within {}ms", .waited.as_millis())]
    Timeout { condition: String, waited: Duration },

    /// Hard failure raised while evaluating the condition
    #[error(transparent)]
    Dom(#[from] DomError),
}

impl WaitError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }

    /// Timeouts and stale handles are the expected transient outcomes.
    pub fn is_transient(&self) -> bool {
        match self {
            WaitError::Timeout { .. } => true,
            WaitError::Dom(err) => err.is_stale(),
        }
    }

    /// Get error severity level (0=low, 1=medium, 2=high)
    pub fn severity(&self) -> u8 {
        match self {
            WaitError::Timeout { .. } => 1,
            WaitError::Dom(err) => err.severity(),
        }
    }
}
