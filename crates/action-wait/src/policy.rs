use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::WaitTier;

/// Budgets for the two wait tiers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitTimeouts {
    pub small_ms: u64,
    pub medium_ms: u64,
}

impl WaitTimeouts {
    pub fn for_tier(&self, tier: WaitTier) -> Duration {
        match tier {
            WaitTier::Small => self.small(),
            WaitTier::Medium => self.medium(),
        }
    }

    pub fn small(&self) -> Duration {
        Duration::from_millis(self.small_ms)
    }

    pub fn medium(&self) -> Duration {
        Duration::from_millis(self.medium_ms)
    }
}

impl Default for WaitTimeouts {
    fn default() -> Self {
        Self {
            small_ms: 5_000,
            medium_ms: 15_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_map_to_their_budget() {
        let timeouts = WaitTimeouts::default();
        assert_eq!(timeouts.for_tier(WaitTier::Small), Duration::from_secs(5));
        assert_eq!(timeouts.for_tier(WaitTier::Medium), Duration::from_secs(15));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let timeouts: WaitTimeouts = serde_json::from_str(r#"{"small_ms": 250}"#).unwrap();
        assert_eq!(timeouts.small_ms, 250);
        assert_eq!(timeouts.medium_ms, 15_000);
    }
}
