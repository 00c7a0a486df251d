//! Dialog field resolution for the authoring console
//!
//! A field is addressed by its type tag and an optional label. The
//! [`DialogConfigurer`] finds the matching container in a dialog tab and binds
//! a handler built by the factory registered for the tag in a
//! [`FieldTypeRegistry`]. Multifield items re-enter the configurer for each of
//! their sub-fields.

mod configurer;
pub mod errors;
mod kind;
pub mod model;
mod multifield;
pub mod ports;
mod registry;

pub use configurer::DialogConfigurer;
pub use errors::DialogError;
pub use kind::FieldKind;
pub use model::{ComponentData, FieldConfig, FieldValue, MultifieldEntry};
pub use multifield::MultifieldItem;
pub use ports::{DialogField, FieldBinding, FieldFactory};
pub use registry::FieldTypeRegistry;
