use async_trait::async_trait;

use crate::{DomError, Scope, Selector};

/// Element traversal and interaction against the live console.
///
/// Implementations wrap a concrete driver session. Every method may fail with
/// [`DomError::Stale`] when `scope` no longer points at an attached node.
#[async_trait]
pub trait DomPort: Send + Sync {
    /// All matches beneath `scope`, in document order. Never includes `scope`.
    async fn find_all(&self, scope: &Scope, selector: &Selector) -> Result<Vec<Scope>, DomError>;

    /// First match beneath `scope`, or [`DomError::NoSuchElement`].
    async fn find_first(&self, scope: &Scope, selector: &Selector) -> Result<Scope, DomError>;

    /// Rendered text of the node.
    async fn text(&self, scope: &Scope) -> Result<String, DomError>;

    async fn attribute(&self, scope: &Scope, name: &str) -> Result<Option<String>, DomError>;

    async fn is_displayed(&self, scope: &Scope) -> Result<bool, DomError>;

    /// `false` once the node has been detached; does not raise `Stale`.
    async fn is_attached(&self, scope: &Scope) -> Result<bool, DomError>;

    /// May fail with [`DomError::ClickIntercepted`] while an overlay covers the node.
    async fn click(&self, scope: &Scope) -> Result<(), DomError>;
}
