use async_trait::async_trait;
use authoring_core_types::Scope;

use crate::configurer::DialogConfigurer;
use crate::errors::DialogError;
use crate::kind::FieldKind;
use crate::model::FieldValue;

/// Handler bound to exactly one field container.
#[async_trait]
pub trait DialogField: Send + Sync {
    fn scope(&self) -> &Scope;

    async fn set_value(&self, value: &FieldValue) -> Result<(), DialogError>;
}

/// Everything a factory gets to build a handler.
#[derive(Clone)]
pub struct FieldBinding {
    pub scope: Scope,
    pub tag: String,
    pub kind: FieldKind,
    /// Lets composite handlers resolve their own sub-fields.
    pub configurer: DialogConfigurer,
}

/// Builds a fresh handler per resolution; handlers are never reused.
pub trait FieldFactory: Send + Sync {
    fn build(&self, binding: FieldBinding) -> Box<dyn DialogField>;
}

impl<F> FieldFactory for F
where
    F: Fn(FieldBinding) -> Box<dyn DialogField> + Send + Sync,
{
    fn build(&self, binding: FieldBinding) -> Box<dyn DialogField> {
        self(binding)
    }
}
