//! Core data types for condition polling

use authoring_core_types::DomError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::WaitError;

/// Result of one poll attempt, or of a whole poll loop.
///
/// Checks produce `Ready` or `Retry`; only the loop produces `TimedOut`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    Ready(T),
    Retry,
    TimedOut,
}

impl PollOutcome<()> {
    /// Boolean conditions: `true` is ready, `false` is not yet.
    pub fn when(condition: bool) -> Self {
        if condition {
            PollOutcome::Ready(())
        } else {
            PollOutcome::Retry
        }
    }
}

impl<T> PollOutcome<T> {
    /// Treats a detached handle as "not yet ready" for this attempt only.
    pub fn absorb_stale(result: Result<T, DomError>) -> Result<Self, WaitError> {
        match result {
            Ok(value) => Ok(PollOutcome::Ready(value)),
            Err(err) if err.is_stale() => {
                debug!("stale element during poll attempt: {}", err);
                Ok(PollOutcome::Retry)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, PollOutcome::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            PollOutcome::Ready(value) => Some(value),
            PollOutcome::Retry | PollOutcome::TimedOut => None,
        }
    }
}

impl<T> From<Option<T>> for PollOutcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => PollOutcome::Ready(value),
            None => PollOutcome::Retry,
        }
    }
}

/// Wait tiers recognised by the console.
///
/// - Small: fast UI feedback such as class attribute changes
/// - Medium: AJAX-backed transitions and re-renders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaitTier {
    #[default]
    Small,
    Medium,
}
