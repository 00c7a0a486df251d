//! Condition polling for the authoring console
//!
//! This crate turns flaky DOM state into deterministic outcomes:
//! - A fixed-interval poll loop driven by [`PollOutcome`] values
//! - SMALL and MEDIUM wait tiers backed by [`WaitTimeouts`]
//! - Stale-safe invocation that retries detached element handles
//! - Attribute, visibility and staleness helpers built on top of the loop

pub mod errors;
mod conditions;
pub mod policy;
pub mod types;
mod waiting;

pub use errors::*;
pub use policy::*;
pub use types::*;
pub use waiting::*;
