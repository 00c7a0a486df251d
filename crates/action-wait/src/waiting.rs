//! Poll loop and its outward-facing contracts

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use authoring_core_types::{DomError, DomPort, Scope};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::errors::WaitError;
use crate::policy::WaitTimeouts;
use crate::types::{PollOutcome, WaitTier};

/// Delay between two attempts of the same poll loop.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Polling engine shared by every page object.
///
/// Attempts within one loop are strictly sequential; nothing is spawned.
#[derive(Clone)]
pub struct Conditions {
    dom: Arc<dyn DomPort>,
    timeouts: WaitTimeouts,
}

impl Conditions {
    pub fn new(dom: Arc<dyn DomPort>, timeouts: WaitTimeouts) -> Self {
        Self { dom, timeouts }
    }

    pub fn dom(&self) -> &Arc<dyn DomPort> {
        &self.dom
    }

    pub fn timeouts(&self) -> &WaitTimeouts {
        &self.timeouts
    }

    /// Runs `check` until it is ready or `timeout` elapses.
    ///
    /// Returns `Ready` or `TimedOut`. The last attempt happens at the
    /// deadline. Errors raised by `check` end the loop immediately.
    pub async fn poll<T, F, Fut>(
        &self,
        description: &str,
        timeout: Duration,
        mut check: F,
    ) -> Result<PollOutcome<T>, WaitError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<PollOutcome<T>, WaitError>>,
    {
        let deadline = Instant::now() + timeout;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match check().await? {
                PollOutcome::Ready(value) => {
                    debug!(condition = description, attempt, "condition met");
                    return Ok(PollOutcome::Ready(value));
                }
                PollOutcome::TimedOut => return Ok(PollOutcome::TimedOut),
                PollOutcome::Retry => {}
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                warn!(
                    condition = description,
                    attempt,
                    timeout_ms = timeout.as_millis() as u64,
                    "condition not met before deadline"
                );
                return Ok(PollOutcome::TimedOut);
            }

            debug!(condition = description, attempt, "condition not met yet");
            sleep(remaining.min(POLL_INTERVAL)).await;
        }
    }

    /// Like [`Conditions::poll`], with a timeout turned into [`WaitError::Timeout`].
    pub async fn verify<T, F, Fut>(
        &self,
        description: &str,
        tier: WaitTier,
        check: F,
    ) -> Result<T, WaitError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<PollOutcome<T>, WaitError>>,
    {
        let timeout = self.timeouts.for_tier(tier);
        match self.poll(description, timeout, check).await? {
            PollOutcome::Ready(value) => Ok(value),
            PollOutcome::Retry | PollOutcome::TimedOut => Err(WaitError::Timeout {
                condition: description.to_string(),
                waited: timeout,
            }),
        }
    }

    /// `false` on timeout or on a stale handle; other failures still propagate.
    pub async fn is_condition_met<T, F, Fut>(
        &self,
        description: &str,
        tier: WaitTier,
        check: F,
    ) -> Result<bool, WaitError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<PollOutcome<T>, WaitError>>,
    {
        match self.verify(description, tier, check).await {
            Ok(_) => Ok(true),
            Err(WaitError::Timeout { .. }) => Ok(false),
            Err(WaitError::Dom(err)) if err.is_stale() => {
                debug!(condition = description, "handle went stale: {}", err);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Absence within the budget is an acceptable answer here, not an error.
    pub async fn optional_wait<T, F, Fut>(
        &self,
        description: &str,
        tier: WaitTier,
        check: F,
    ) -> Result<Option<T>, WaitError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<PollOutcome<T>, WaitError>>,
    {
        match self.verify(description, tier, check).await {
            Ok(value) => Ok(Some(value)),
            Err(WaitError::Timeout { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Invokes `operation` on `scope`, retrying attempts that hit a stale handle.
    ///
    /// Runs under the MEDIUM tier. A handle that stays stale for the whole
    /// budget surfaces as [`WaitError::Timeout`].
    pub async fn stale_safe<T, F, Fut>(&self, scope: &Scope, mut operation: F) -> Result<T, WaitError>
    where
        F: FnMut(Scope) -> Fut,
        Fut: Future<Output = Result<T, DomError>>,
    {
        let description = format!("stale-safe operation on {}", scope);
        self.verify(&description, WaitTier::Medium, || {
            let attempt = operation(scope.clone());
            async move { PollOutcome::absorb_stale(attempt.await) }
        })
        .await
    }
}
