use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::multifield::MultifieldItem;
use crate::ports::FieldFactory;

/// Field type tag to handler factory.
///
/// Populated once by the caller, then shared read-only by every resolver.
#[derive(Clone, Default)]
pub struct FieldTypeRegistry {
    factories: HashMap<String, Arc<dyn FieldFactory>>,
}

impl FieldTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the handlers this crate ships (`multifield`).
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(MultifieldItem::TAG, MultifieldItem::build);
        registry
    }

    /// Registers `factory` for `tag`, replacing any previous one.
    pub fn register<F>(&mut self, tag: impl Into<String>, factory: F) -> &mut Self
    where
        F: FieldFactory + 'static,
    {
        self.factories.insert(tag.into(), Arc::new(factory));
        self
    }

    pub fn get(&self, tag: &str) -> Option<Arc<dyn FieldFactory>> {
        self.factories.get(tag).cloned()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl fmt::Debug for FieldTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.tags().collect();
        tags.sort_unstable();
        f.debug_struct("FieldTypeRegistry").field("tags", &tags).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_knows_multifield_only() {
        let registry = FieldTypeRegistry::with_builtin();
        assert!(registry.contains("multifield"));
        assert!(registry.get("textfield").is_none());
        assert_eq!(format!("{registry:?}"), "FieldTypeRegistry { tags: [\"multifield\"] }");
    }
}
