use std::sync::Arc;

use async_trait::async_trait;
use authoring_core_types::{DomError, Scope};
use dialog_fields::ComponentData;

use crate::errors::ParsysError;

/// Window listing the components that can be dropped into a parsys.
#[async_trait]
pub trait InsertSurface: Send + Sync {
    /// Displayed and populated with insertable components.
    async fn is_ready(&self) -> Result<bool, DomError>;

    async fn insert_component(&self, title: &str) -> Result<(), ParsysError>;
}

/// Component instance living in a parsys.
#[async_trait]
pub trait Component: Send + Sync {
    fn scope(&self) -> &Scope;

    /// Opens the component dialog and applies `data` tab by tab.
    async fn configure(&self, data: &ComponentData) -> Result<(), ParsysError>;

    async fn delete(&self) -> Result<(), ParsysError>;
}

/// Wraps a child overlay in a [`Component`].
pub trait ComponentBinder: Send + Sync {
    fn bind(&self, scope: Scope) -> Box<dyn Component>;
}

impl<F> ComponentBinder for F
where
    F: Fn(Scope) -> Box<dyn Component> + Send + Sync,
{
    fn bind(&self, scope: Scope) -> Box<dyn Component> {
        self(scope)
    }
}

/// Collaborators a [`crate::Parsys`] hands work to.
#[derive(Clone)]
pub struct ParsysPorts {
    pub surface: Arc<dyn InsertSurface>,
    pub binder: Arc<dyn ComponentBinder>,
}
