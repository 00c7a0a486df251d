//! Field type tags and the selectors used to find their containers

use std::fmt;

use authoring_core_types::Selector;

const FIELD_WRAPPER: Selector = Selector::css(".coral-Form-fieldwrapper");
const IMAGE_FIELD: Selector = Selector::css(".coral-Form-field.cq-FileUpload");
const CHECKBOX_FIELD: Selector = Selector::css(".coral-Form-field.coral3-Checkbox");
const RADIO_GROUP_FIELD: Selector = Selector::css(".coral-Form-field.coral-RadioGroup");
const MULTIFIELD_ITEM: Selector = Selector::css(".coral3-Multifield-item");

const FIELD_LABEL: Selector = Selector::css("label.coral-Form-fieldlabel, label.coral-Form-field");
const CHECKBOX_LABEL: Selector = Selector::css("label.coral3-Checkbox-description");

/// Tags whose containers are not plain field wrappers.
const SPECIAL_TAGS: [(&str, FieldKind); 4] = [
    ("image", FieldKind::Image),
    ("checkbox", FieldKind::Checkbox),
    ("radiogroupmulti", FieldKind::RadioGroupMulti),
    ("multifield", FieldKind::MultifieldItem),
];

/// How a field type is located inside a dialog tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FieldKind {
    Image,
    Checkbox,
    RadioGroupMulti,
    MultifieldItem,
    /// Any other tag: text fields, selects, path browsers, rich text...
    #[default]
    Generic,
}

impl FieldKind {
    /// Total over the open tag set; unknown tags are [`FieldKind::Generic`].
    pub fn from_tag(tag: &str) -> Self {
        SPECIAL_TAGS
            .iter()
            .find(|(special, _)| *special == tag)
            .map(|(_, kind)| *kind)
            .unwrap_or_default()
    }

    /// Canonical tag, `None` for generic fields.
    pub fn tag(self) -> Option<&'static str> {
        SPECIAL_TAGS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(tag, _)| *tag)
    }

    pub fn container_selector(self) -> Selector {
        match self {
            FieldKind::Image => IMAGE_FIELD,
            FieldKind::Checkbox => CHECKBOX_FIELD,
            FieldKind::RadioGroupMulti => RADIO_GROUP_FIELD,
            FieldKind::MultifieldItem => MULTIFIELD_ITEM,
            FieldKind::Generic => FIELD_WRAPPER,
        }
    }

    pub fn label_selector(self) -> Selector {
        match self {
            FieldKind::Checkbox => CHECKBOX_LABEL,
            _ => FIELD_LABEL,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().unwrap_or("generic"))
    }
}
