use async_trait::async_trait;
use authoring_core_types::{DomPort, Scope, Selector};
use tracing::debug;

use crate::configurer::DialogConfigurer;
use crate::errors::DialogError;
use crate::model::FieldValue;
use crate::ports::{DialogField, FieldBinding};

const REMOVE_BUTTON: Selector = Selector::css("button.coral3-Multifield-remove");

/// One item of a multifield; its sub-fields are resolved inside the item.
pub struct MultifieldItem {
    item: Scope,
    configurer: DialogConfigurer,
}

impl MultifieldItem {
    pub const TAG: &'static str = "multifield";

    pub fn new(binding: FieldBinding) -> Self {
        Self {
            item: binding.scope,
            configurer: binding.configurer,
        }
    }

    /// Factory registered under [`MultifieldItem::TAG`].
    pub fn build(binding: FieldBinding) -> Box<dyn DialogField> {
        Box::new(Self::new(binding))
    }

    /// Clicks the item's remove button. Completion is not awaited.
    pub async fn delete_item(&self) -> Result<(), DialogError> {
        let dom = self.configurer.dom();
        let button = dom.find_first(&self.item, &REMOVE_BUTTON).await?;
        dom.click(&button).await?;
        debug!(item = %self.item, "multifield item removed");
        Ok(())
    }
}

#[async_trait]
impl DialogField for MultifieldItem {
    fn scope(&self) -> &Scope {
        &self.item
    }

    async fn set_value(&self, value: &FieldValue) -> Result<(), DialogError> {
        let entry = value.as_entry().ok_or_else(|| DialogError::UnexpectedValue {
            tag: Self::TAG.to_string(),
            expected: "a multifield entry with `item` sub-fields",
        })?;
        self.configurer.apply_fields(&self.item, &entry.item).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use authoring_core_types::fake::{InMemoryDom, NodeSpec};
    use parking_lot::Mutex;
    use serde_json::json;

    use super::*;
    use crate::model::{FieldConfig, MultifieldEntry};
    use crate::registry::FieldTypeRegistry;

    /// Text field that records what it was given and refuses `"boom"`.
    struct Text {
        scope: Scope,
        log: Arc<Mutex<Vec<(Scope, FieldValue)>>>,
    }

    #[async_trait]
    impl DialogField for Text {
        fn scope(&self) -> &Scope {
            &self.scope
        }

        async fn set_value(&self, value: &FieldValue) -> Result<(), DialogError> {
            if value.as_leaf() == Some(&json!("boom")) {
                return Err(DialogError::UnexpectedValue {
                    tag: "textfield".into(),
                    expected: "anything but boom",
                });
            }
            self.log.lock().push((self.scope.clone(), value.clone()));
            Ok(())
        }
    }

    struct Fixture {
        dom: Arc<InMemoryDom>,
        configurer: DialogConfigurer,
        log: Arc<Mutex<Vec<(Scope, FieldValue)>>>,
        items: Vec<Scope>,
        fields: Vec<Vec<Scope>>,
    }

    /// A multifield with `count` items, each holding "Text", "Link" and "Alt" fields.
    fn fixture(count: usize) -> Fixture {
        let dom = Arc::new(InMemoryDom::new());
        let multifield = dom.append(&dom.root(), NodeSpec::new("coral-multifield"));
        let mut items = Vec::new();
        let mut fields = Vec::new();
        for _ in 0..count {
            let item = dom.append(
                &multifield,
                NodeSpec::new("coral-multifield-item").class("coral3-Multifield-item"),
            );
            let mut wrappers = Vec::new();
            for label in ["Text", "Link", "Alt"] {
                let wrapper = dom.append(&item, NodeSpec::new("div").class("coral-Form-fieldwrapper"));
                dom.append(&wrapper, NodeSpec::new("label").class("coral-Form-fieldlabel").text(label));
                wrappers.push(wrapper);
            }
            dom.append(&item, NodeSpec::new("button").class("coral3-Multifield-remove"));
            items.push(item);
            fields.push(wrappers);
        }

        let log: Arc<Mutex<Vec<(Scope, FieldValue)>>> = Arc::default();
        let mut registry = FieldTypeRegistry::with_builtin();
        let sink = log.clone();
        registry.register("textfield", move |binding: FieldBinding| -> Box<dyn DialogField> {
            Box::new(Text {
                scope: binding.scope,
                log: sink.clone(),
            })
        });
        let configurer = DialogConfigurer::new(dom.clone(), Arc::new(registry));
        Fixture {
            dom,
            configurer,
            log,
            items,
            fields,
        }
    }

    fn entry(values: [&str; 3]) -> FieldValue {
        let [text, link, alt] = values;
        FieldValue::Entry(MultifieldEntry {
            item: vec![
                FieldConfig::new("Text", "textfield", text.into()),
                FieldConfig::new("Link", "textfield", link.into()),
                FieldConfig::new("Alt", "textfield", alt.into()),
            ],
        })
    }

    #[tokio::test]
    async fn entries_are_applied_in_order_inside_the_item() {
        let fx = fixture(2);
        let item = fx
            .configurer
            .get_dialog_field(&fx.dom.root(), None, "multifield")
            .await
            .unwrap();
        assert_eq!(item.scope(), &fx.items[0]);

        item.set_value(&entry(["Home", "/content/en", "Logo"])).await.unwrap();

        let log = fx.log.lock();
        let expected = vec![
            (fx.fields[0][0].clone(), FieldValue::from("Home")),
            (fx.fields[0][1].clone(), FieldValue::from("/content/en")),
            (fx.fields[0][2].clone(), FieldValue::from("Logo")),
        ];
        assert_eq!(*log, expected);
    }

    #[tokio::test]
    async fn failing_entry_stops_the_rest() {
        let fx = fixture(1);
        let item = fx.configurer.get_multifield_item(&fx.items[0], None).await;
        assert!(matches!(item, Err(DialogError::NoFieldsInScope { .. })));

        let item = fx.configurer.get_multifield_item(&fx.dom.root(), None).await.unwrap();
        let err = item
            .set_value(&entry(["Home", "boom", "Logo"]))
            .await
            .unwrap_err();

        assert!(matches!(err, DialogError::UnexpectedValue { .. }));
        let log = fx.log.lock();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].1, FieldValue::from("Home"));
    }

    #[tokio::test]
    async fn unresolved_entry_stops_the_rest() {
        let fx = fixture(1);
        let item = fx.configurer.get_multifield_item(&fx.dom.root(), None).await.unwrap();
        let value = FieldValue::Entry(MultifieldEntry {
            item: vec![
                FieldConfig::new("Text", "textfield", "Home".into()),
                FieldConfig::new("Caption", "textfield", "Welcome".into()),
                FieldConfig::new("Alt", "textfield", "Logo".into()),
            ],
        });

        let err = item.set_value(&value).await.unwrap_err();

        match err {
            DialogError::FieldNotFound { tag, label } => {
                assert_eq!(tag, "textfield");
                assert_eq!(label, "Caption");
            }
            other => panic!("unexpected error: {other}"),
        }
        let log = fx.log.lock();
        assert_eq!(*log, vec![(fx.fields[0][0].clone(), FieldValue::from("Home"))]);
    }

    #[tokio::test]
    async fn leaf_values_are_rejected() {
        let fx = fixture(1);
        let item = fx.configurer.get_multifield_item(&fx.dom.root(), None).await.unwrap();

        let err = item.set_value(&FieldValue::from("plain")).await.unwrap_err();

        assert!(matches!(err, DialogError::UnexpectedValue { tag, .. } if tag == "multifield"));
        assert!(fx.log.lock().is_empty());
    }

    #[tokio::test]
    async fn delete_clicks_the_remove_button_of_its_item() {
        let fx = fixture(2);
        let item = fx.configurer.get_multifield_item(&fx.dom.root(), None).await.unwrap();
        assert_eq!(item.scope(), &fx.items[0]);

        item.delete_item().await.unwrap();

        let clicks = fx.dom.clicks();
        assert_eq!(clicks.len(), 1);
        let remove = fx
            .dom
            .find_first(&fx.items[0], &REMOVE_BUTTON)
            .await
            .unwrap();
        assert_eq!(clicks[0], remove);
    }
}
