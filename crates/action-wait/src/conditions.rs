//! Element-level conditions built on the poll loop

use std::future::Future;

use authoring_core_types::Scope;
use tracing::debug;

use crate::errors::WaitError;
use crate::types::{PollOutcome, WaitTier};
use crate::waiting::Conditions;

impl Conditions {
    /// Waits (SMALL) until `attribute` of `scope` contains `value`.
    pub async fn has_attribute_with_value(
        &self,
        scope: &Scope,
        attribute: &str,
        value: &str,
    ) -> Result<bool, WaitError> {
        let dom = self.dom();
        let description = format!("{} of {} contains `{}`", attribute, scope, value);
        self.is_condition_met(&description, WaitTier::Small, move || async move {
            let current = dom.attribute(scope, attribute).await?;
            Ok::<_, WaitError>(PollOutcome::when(
                current.map_or(false, |current| current.contains(value)),
            ))
        })
        .await
    }

    pub async fn class_contains(&self, scope: &Scope, value: &str) -> Result<bool, WaitError> {
        self.has_attribute_with_value(scope, "class", value).await
    }

    /// Waits (MEDIUM) until `scope` is displayed; a stale attempt counts as "not yet".
    pub async fn element_ready(&self, scope: &Scope) -> Result<Scope, WaitError> {
        let dom = self.dom();
        let description = format!("{} displayed", scope);
        self.verify(&description, WaitTier::Medium, move || async move {
            Ok::<_, WaitError>(match PollOutcome::absorb_stale(dom.is_displayed(scope).await)? {
                PollOutcome::Ready(true) => PollOutcome::Ready(scope.clone()),
                _ => PollOutcome::Retry,
            })
        })
        .await
    }

    /// `true` while `scope` stays attached; `false` once it went stale.
    pub async fn is_not_stale(&self, scope: &Scope) -> Result<bool, WaitError> {
        let dom = self.dom();
        let description = format!("{} attached", scope);
        self.is_condition_met(&description, WaitTier::Small, move || async move {
            Ok::<_, WaitError>(PollOutcome::when(dom.is_attached(scope).await?))
        })
        .await
    }

    /// Waits for the author loader to go away, then verifies `check` under MEDIUM.
    pub async fn verify_post_ajax<T, F, Fut>(
        &self,
        loader: &Scope,
        description: &str,
        check: F,
    ) -> Result<T, WaitError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<PollOutcome<T>, WaitError>>,
    {
        let dom = self.dom();
        self.verify("author loader hidden", WaitTier::Medium, move || async move {
            if !dom.is_attached(loader).await? {
                return Ok(PollOutcome::Ready(()));
            }
            Ok::<_, WaitError>(match PollOutcome::absorb_stale(dom.is_displayed(loader).await)? {
                PollOutcome::Ready(displayed) => PollOutcome::when(!displayed),
                // detached between the two reads
                _ => PollOutcome::Ready(()),
            })
        })
        .await?;
        debug!(condition = description, "loader hidden, verifying");
        self.verify(description, WaitTier::Medium, check).await
    }
}
