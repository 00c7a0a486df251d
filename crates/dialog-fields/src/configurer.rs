//! Label-driven resolution of dialog fields

use std::sync::Arc;

use authoring_core_types::{DomPort, Scope, Selector};
use tracing::{debug, instrument, warn};

use crate::errors::DialogError;
use crate::kind::FieldKind;
use crate::model::FieldConfig;
use crate::multifield::MultifieldItem;
use crate::ports::{DialogField, FieldBinding};
use crate::registry::FieldTypeRegistry;

const INPUT: Selector = Selector::tag("input");

/// Resolves `(scope, label, tag)` to a freshly bound field handler.
///
/// Resolution reads the dialog once and never polls; callers wait for the
/// dialog to settle before asking for fields.
#[derive(Clone)]
pub struct DialogConfigurer {
    dom: Arc<dyn DomPort>,
    registry: Arc<FieldTypeRegistry>,
}

impl DialogConfigurer {
    pub fn new(dom: Arc<dyn DomPort>, registry: Arc<FieldTypeRegistry>) -> Self {
        Self { dom, registry }
    }

    pub fn dom(&self) -> &Arc<dyn DomPort> {
        &self.dom
    }

    pub fn registry(&self) -> &FieldTypeRegistry {
        &self.registry
    }

    /// Finds the field of type `tag` whose label contains `label`.
    ///
    /// Without a label (or with an empty one) the first field of the type wins.
    pub async fn get_dialog_field(
        &self,
        scope: &Scope,
        label: Option<&str>,
        tag: &str,
    ) -> Result<Box<dyn DialogField>, DialogError> {
        let kind = FieldKind::from_tag(tag);
        let container = self.locate(scope, label, tag, kind).await?;
        self.bind(container, tag, kind)
    }

    /// Binds a `tag` handler to the first `input` beneath `scope`.
    pub async fn get_input_field(
        &self,
        scope: &Scope,
        tag: &str,
    ) -> Result<Box<dyn DialogField>, DialogError> {
        let input = self.dom.find_first(scope, &INPUT).await?;
        self.bind(input, tag, FieldKind::from_tag(tag))
    }

    /// Typed variant of `get_dialog_field(scope, label, "multifield")`.
    pub async fn get_multifield_item(
        &self,
        scope: &Scope,
        label: Option<&str>,
    ) -> Result<MultifieldItem, DialogError> {
        let kind = FieldKind::MultifieldItem;
        let item = self.locate(scope, label, MultifieldItem::TAG, kind).await?;
        Ok(MultifieldItem::new(FieldBinding {
            scope: item,
            tag: MultifieldItem::TAG.to_string(),
            kind,
            configurer: self.clone(),
        }))
    }

    /// Resolves and fills each field in order; the first failure stops the rest.
    #[instrument(skip_all, fields(scope = %scope, fields = fields.len()))]
    pub async fn apply_fields(&self, scope: &Scope, fields: &[FieldConfig]) -> Result<(), DialogError> {
        for field in fields {
            debug!(label = %field.label, field_type = %field.field_type, "setting dialog field");
            let handler = self
                .get_dialog_field(scope, Some(&field.label), &field.field_type)
                .await
                .map_err(|err| {
                    if err.is_lookup_failure() {
                        warn!(label = %field.label, field_type = %field.field_type, "dialog field unresolved: {}", err);
                    }
                    err
                })?;
            handler.set_value(&field.value).await?;
        }
        Ok(())
    }

    async fn locate(
        &self,
        scope: &Scope,
        label: Option<&str>,
        tag: &str,
        kind: FieldKind,
    ) -> Result<Scope, DialogError> {
        let containers = self.dom.find_all(scope, &kind.container_selector()).await?;
        let Some(first) = containers.first() else {
            return Err(DialogError::NoFieldsInScope { tag: tag.to_string() });
        };

        let query = match label {
            Some(label) if !label.is_empty() => label.to_lowercase(),
            _ => return Ok(first.clone()),
        };

        let label_selector = kind.label_selector();
        for container in &containers {
            let text = self.label_text(container, &label_selector).await?;
            if text.to_lowercase().contains(&query) {
                debug!(tag, label = %text, container = %container, "dialog field matched");
                return Ok(container.clone());
            }
        }

        Err(DialogError::FieldNotFound {
            tag: tag.to_string(),
            label: label.unwrap_or_default().to_string(),
        })
    }

    /// Text of the first label beneath `container`, empty when there is none.
    async fn label_text(&self, container: &Scope, selector: &Selector) -> Result<String, DialogError> {
        let labels = self.dom.find_all(container, selector).await?;
        match labels.first() {
            Some(label) => Ok(self.dom.text(label).await?),
            None => Ok(String::new()),
        }
    }

    fn bind(&self, scope: Scope, tag: &str, kind: FieldKind) -> Result<Box<dyn DialogField>, DialogError> {
        let factory = self
            .registry
            .get(tag)
            .ok_or_else(|| DialogError::UnknownFieldType(tag.to_string()))?;
        Ok(factory.build(FieldBinding {
            scope,
            tag: tag.to_string(),
            kind,
            configurer: self.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldValue;
    use async_trait::async_trait;
    use authoring_core_types::fake::{InMemoryDom, NodeSpec};
    use authoring_core_types::DomError;
    use parking_lot::Mutex;

    type Log = Arc<Mutex<Vec<(String, Scope, FieldValue)>>>;

    struct Recording {
        binding: FieldBinding,
        log: Log,
    }

    #[async_trait]
    impl DialogField for Recording {
        fn scope(&self) -> &Scope {
            &self.binding.scope
        }

        async fn set_value(&self, value: &FieldValue) -> Result<(), DialogError> {
            self.log
                .lock()
                .push((self.binding.tag.clone(), self.binding.scope.clone(), value.clone()));
            Ok(())
        }
    }

    fn configurer(dom: &Arc<InMemoryDom>, tags: &[&str]) -> (DialogConfigurer, Log) {
        let log: Log = Arc::default();
        let mut registry = FieldTypeRegistry::with_builtin();
        for tag in tags {
            let log = log.clone();
            registry.register(*tag, move |binding: FieldBinding| -> Box<dyn DialogField> {
                Box::new(Recording {
                    binding,
                    log: log.clone(),
                })
            });
        }
        (DialogConfigurer::new(dom.clone(), Arc::new(registry)), log)
    }

    fn wrapper(dom: &InMemoryDom, parent: &Scope, label: Option<&str>) -> Scope {
        let field = dom.append(parent, NodeSpec::new("div").class("coral-Form-fieldwrapper"));
        if let Some(label) = label {
            dom.append(&field, NodeSpec::new("label").class("coral-Form-fieldlabel").text(label));
        }
        dom.append(&field, NodeSpec::new("input").attr("type", "text"));
        field
    }

    #[tokio::test]
    async fn empty_label_selects_first_container() {
        let dom = Arc::new(InMemoryDom::new());
        let tab = dom.append(&dom.root(), NodeSpec::new("div"));
        let first = wrapper(&dom, &tab, Some("Description"));
        wrapper(&dom, &tab, Some("Title"));
        let (configurer, _) = configurer(&dom, &["textfield"]);

        let by_none = configurer.get_dialog_field(&tab, None, "textfield").await.unwrap();
        let by_empty = configurer.get_dialog_field(&tab, Some(""), "textfield").await.unwrap();

        assert_eq!(by_none.scope(), &first);
        assert_eq!(by_empty.scope(), &first);
    }

    #[tokio::test]
    async fn label_match_ignores_case() {
        let dom = Arc::new(InMemoryDom::new());
        let tab = dom.append(&dom.root(), NodeSpec::new("div"));
        wrapper(&dom, &tab, None);
        wrapper(&dom, &tab, Some("Description"));
        let title = wrapper(&dom, &tab, Some("Link Title"));
        let (configurer, _) = configurer(&dom, &["textfield"]);

        let field = configurer
            .get_dialog_field(&tab, Some("link TITLE"), "textfield")
            .await
            .unwrap();

        assert_eq!(field.scope(), &title);
    }

    #[tokio::test]
    async fn missing_label_reports_field_not_found() {
        let dom = Arc::new(InMemoryDom::new());
        let tab = dom.append(&dom.root(), NodeSpec::new("div"));
        wrapper(&dom, &tab, Some("Title"));
        let (configurer, _) = configurer(&dom, &["textfield"]);

        let err = configurer
            .get_dialog_field(&tab, Some("Alt text"), "textfield")
            .await
            .err()
            .unwrap();

        match err {
            DialogError::FieldNotFound { tag, label } => {
                assert_eq!(tag, "textfield");
                assert_eq!(label, "Alt text");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_scope_reports_no_fields() {
        let dom = Arc::new(InMemoryDom::new());
        let tab = dom.append(&dom.root(), NodeSpec::new("div"));
        wrapper(&dom, &tab, Some("Title"));
        let (configurer, _) = configurer(&dom, &["image"]);

        let err = configurer.get_dialog_field(&tab, None, "image").await.err().unwrap();

        assert!(matches!(err, DialogError::NoFieldsInScope { tag } if tag == "image"));
    }

    #[tokio::test]
    async fn unregistered_tag_is_not_substituted() {
        let dom = Arc::new(InMemoryDom::new());
        let tab = dom.append(&dom.root(), NodeSpec::new("div"));
        wrapper(&dom, &tab, Some("Title"));
        let (configurer, _) = configurer(&dom, &["textfield"]);

        let err = configurer.get_dialog_field(&tab, None, "richtext").await.err().unwrap();

        assert!(matches!(err, DialogError::UnknownFieldType(tag) if tag == "richtext"));
    }

    #[tokio::test]
    async fn checkbox_labels_use_checkbox_description() {
        let dom = Arc::new(InMemoryDom::new());
        let tab = dom.append(&dom.root(), NodeSpec::new("div"));
        let hide = dom.append(&tab, NodeSpec::new("coral-checkbox").class("coral-Form-field coral3-Checkbox"));
        // a generic label inside a checkbox is not its label
        dom.append(&hide, NodeSpec::new("label").class("coral-Form-fieldlabel").text("Open in new tab"));
        dom.append(&hide, NodeSpec::new("label").class("coral3-Checkbox-description").text("Hide title"));
        let new_tab = dom.append(&tab, NodeSpec::new("coral-checkbox").class("coral-Form-field coral3-Checkbox"));
        dom.append(&new_tab, NodeSpec::new("label").class("coral3-Checkbox-description").text("Open in new tab"));
        let (configurer, _) = configurer(&dom, &["checkbox"]);

        let field = configurer
            .get_dialog_field(&tab, Some("new tab"), "checkbox")
            .await
            .unwrap();

        assert_eq!(field.scope(), &new_tab);
    }

    #[tokio::test]
    async fn generic_labels_accept_either_label_class() {
        let dom = Arc::new(InMemoryDom::new());
        let tab = dom.append(&dom.root(), NodeSpec::new("div"));
        let group = dom.append(&tab, NodeSpec::new("div").class("coral-Form-field coral-RadioGroup"));
        dom.append(&group, NodeSpec::new("label").class("coral-Form-field").text("Alignment"));
        let (configurer, _) = configurer(&dom, &["radiogroupmulti"]);

        let field = configurer
            .get_dialog_field(&tab, Some("align"), "radiogroupmulti")
            .await
            .unwrap();

        assert_eq!(field.scope(), &group);
    }

    #[tokio::test]
    async fn input_mode_binds_first_input() {
        let dom = Arc::new(InMemoryDom::new());
        let item = dom.append(&dom.root(), NodeSpec::new("div"));
        let input = dom.append(&item, NodeSpec::new("input"));
        dom.append(&item, NodeSpec::new("input"));
        let (configurer, _) = configurer(&dom, &["textfield"]);

        let field = configurer.get_input_field(&item, "textfield").await.unwrap();
        assert_eq!(field.scope(), &input);

        let empty = dom.append(&dom.root(), NodeSpec::new("div"));
        let err = configurer.get_input_field(&empty, "textfield").await.err().unwrap();
        assert!(matches!(err, DialogError::Dom(DomError::NoSuchElement { .. })));
    }

    #[tokio::test]
    async fn apply_fields_sets_values_in_order() {
        let dom = Arc::new(InMemoryDom::new());
        let tab = dom.append(&dom.root(), NodeSpec::new("div"));
        let title = wrapper(&dom, &tab, Some("Title"));
        let link = wrapper(&dom, &tab, Some("Link"));
        let (configurer, log) = configurer(&dom, &["textfield", "pathbrowser"]);

        configurer
            .apply_fields(
                &tab,
                &[
                    FieldConfig::new("link", "pathbrowser", "/content/site".into()),
                    FieldConfig::new("title", "textfield", "Hello".into()),
                ],
            )
            .await
            .unwrap();

        let log = log.lock();
        assert_eq!(log[0], ("pathbrowser".to_string(), link, FieldValue::from("/content/site")));
        assert_eq!(log[1], ("textfield".to_string(), title, FieldValue::from("Hello")));
    }

    #[tokio::test]
    async fn each_resolution_builds_a_new_handler() {
        let dom = Arc::new(InMemoryDom::new());
        let tab = dom.append(&dom.root(), NodeSpec::new("div"));
        wrapper(&dom, &tab, Some("Title"));
        let built = Arc::new(Mutex::new(0));
        let mut registry = FieldTypeRegistry::new();
        let counter = built.clone();
        registry.register("textfield", move |binding: FieldBinding| -> Box<dyn DialogField> {
            *counter.lock() += 1;
            Box::new(Recording {
                binding,
                log: Arc::default(),
            })
        });
        let configurer = DialogConfigurer::new(dom.clone(), Arc::new(registry));

        configurer.get_dialog_field(&tab, None, "textfield").await.unwrap();
        configurer.get_dialog_field(&tab, None, "textfield").await.unwrap();

        assert_eq!(*built.lock(), 2);
    }
}
