use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One field to resolve and fill, e.g. `{ label: Title, type: textfield, value: Hello }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Case-insensitive label fragment; empty selects the first field of the type.
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub value: FieldValue,
}

impl FieldConfig {
    pub fn new(label: impl Into<String>, field_type: impl Into<String>, value: FieldValue) -> Self {
        Self {
            label: label.into(),
            field_type: field_type.into(),
            value,
        }
    }
}

/// Value handed to a field handler.
///
/// Multifield entries are structured; everything else is opaque to the resolver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Entry(MultifieldEntry),
    Leaf(Value),
}

impl FieldValue {
    pub fn as_entry(&self) -> Option<&MultifieldEntry> {
        match self {
            FieldValue::Entry(entry) => Some(entry),
            FieldValue::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            FieldValue::Leaf(value) => Some(value),
            FieldValue::Entry(_) => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Leaf(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Leaf(Value::String(value.to_string()))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Leaf(Value::Bool(value))
    }
}

impl From<MultifieldEntry> for FieldValue {
    fn from(entry: MultifieldEntry) -> Self {
        FieldValue::Entry(entry)
    }
}

/// Sub-fields of one multifield item, applied in order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultifieldEntry {
    pub item: Vec<FieldConfig>,
}

/// Dialog configuration of a component: tab title to the fields set on that tab.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentData(pub BTreeMap<String, Vec<FieldConfig>>);

impl ComponentData {
    pub fn tab(&self, title: &str) -> Option<&[FieldConfig]> {
        self.0.get(title).map(Vec::as_slice)
    }

    pub fn tabs(&self) -> impl Iterator<Item = (&str, &[FieldConfig])> {
        self.0
            .iter()
            .map(|(title, fields)| (title.as_str(), fields.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
