use thiserror::Error;

/// Failures raised by a [`crate::DomPort`] implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The node behind the handle was detached or replaced
    #[error("stale element reference: {0}")]
    Stale(String),

    /// Another element would receive the click
    #[error("click intercepted on {0}")]
    ClickIntercepted(String),

    /// `find_first` matched nothing
    #[error("no element matches `{selector}` beneath {scope}")]
    NoSuchElement { scope: String, selector: String },

    /// Any other driver or protocol failure
    #[error("driver error: {0}")]
    Driver(String),
}

impl DomError {
    /// Stale handles are expected while the console re-renders.
    pub fn is_stale(&self) -> bool {
        matches!(self, DomError::Stale(_))
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, DomError::Stale(_) | DomError::ClickIntercepted(_))
    }

    /// Get error severity level (0=low, 1=medium, 2=high)
    pub fn severity(&self) -> u8 {
        match self {
            DomError::Driver(_) => 2,
            DomError::NoSuchElement { .. } => 1,
            DomError::Stale(_) | DomError::ClickIntercepted(_) => 0,
        }
    }
}
