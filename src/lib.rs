//! Authoring console automation
//!
//! Reliable interaction with a console that re-renders itself behind the
//! caller's back, plus label-driven dialog configuration. The building blocks
//! live in the workspace crates; this crate wires them to one [`DomPort`]
//! session and carries configuration and logging setup.

mod console;
pub mod config;
pub mod errors;
pub mod telemetry;

pub use console::AuthoringConsole;
pub use config::{load_config, ConsoleConfig};
pub use errors::ConsoleError;

pub use action_wait::{Conditions, PollOutcome, WaitError, WaitTier, WaitTimeouts};
pub use authoring_core_types::{DomError, DomPort, Scope, Selector};
pub use dialog_fields::{
    ComponentData, DialogConfigurer, DialogError, DialogField, FieldBinding, FieldConfig,
    FieldFactory, FieldKind, FieldTypeRegistry, FieldValue, MultifieldEntry, MultifieldItem,
};
pub use parsys_gate::{
    Component, ComponentBinder, InsertSurface, Parsys, ParsysError, ParsysPorts,
};
