//! Protocol types for the overlay
//!
//! Contains the payload types carried by host messages:
//! - MenuItem for OPEN_MENU / SHOW_HEADER
//! - FieldSchema, FieldKind, ChoiceOption for SHOW_INPUT
//! - FormValue for the submitted result
//!
//! Menu items are decoded leniently (a bad item becomes a blank entry at the
//! same index). Field schemas are decoded strictly into a sum type; anything
//! that does not fit is an error.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use serde_json::Value;

use crate::color::ColorValue;
use crate::error::{NuiError, Result};

// ============================================================
// VALUE COERCION
// ============================================================

/// Read a scalar as display text. Strings pass through, numbers and bools
/// are formatted, everything else is absent.
pub(crate) fn value_as_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a number, accepting numeric strings
pub(crate) fn value_as_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Truthiness of a loosely typed flag
pub(crate) fn value_is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        _ => false,
    }
}

fn first_text(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value_as_text(obj.get(*key)))
        .find(|text| !text.is_empty())
}

// ============================================================
// MENU ITEMS
// ============================================================

/// One entry of the list menu.
///
/// The item's identity is its index in the list it arrived in.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub is_menu_header: bool,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Progress percentage (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<String>,
    pub hidden: bool,
    /// Opaque host value kept alongside the item while the menu is open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl MenuItem {
    pub fn new(header: impl Into<String>) -> Self {
        MenuItem {
            header: Some(header.into()),
            ..MenuItem::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Decode one item. Accepts `header`/`title`, `txt`/`text`/`description`
    /// and `progress`/`progressbar`. Non-objects decode to a blank item.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            tracing::warn!(item = %value, "Menu item is not an object, rendering blank");
            return MenuItem::default();
        };

        MenuItem {
            header: first_text(obj, &["header", "title"]),
            text: first_text(obj, &["txt", "text", "description"]),
            is_menu_header: value_is_truthy(obj.get("isMenuHeader")),
            disabled: value_is_truthy(obj.get("disabled")),
            icon: first_text(obj, &["icon"]),
            // a zero `progress` falls through to `progressbar`
            progress: value_as_f64(obj.get("progress"))
                .filter(|p| *p != 0.0)
                .or_else(|| value_as_f64(obj.get("progressbar"))),
            color_scheme: first_text(obj, &["colorScheme"]),
            hidden: value_is_truthy(obj.get("hidden")),
            params: obj.get("params").filter(|p| !p.is_null()).cloned(),
        }
    }

    /// Decode a list of items. A non-array payload is an empty menu.
    pub fn list_from_value(value: &Value) -> Vec<MenuItem> {
        match value.as_array() {
            Some(items) => items.iter().map(MenuItem::from_value).collect(),
            None => {
                if !value.is_null() {
                    tracing::warn!(data = %value, "Menu data is not an array, opening empty menu");
                }
                Vec::new()
            }
        }
    }

    /// Header text used for rendering and filtering
    pub fn header_text(&self) -> &str {
        self.header.as_deref().unwrap_or("")
    }

    /// Whether a click on this item is dispatched to the host
    pub fn is_clickable(&self) -> bool {
        !self.is_menu_header && !self.disabled
    }
}

// ============================================================
// INPUT FIELDS
// ============================================================

/// An option of a radio group or select box
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        ChoiceOption {
            label: value.clone(),
            value,
        }
    }

    /// Accepts a bare scalar or `{value, label}`; label falls back to value
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(obj) => {
                let value = value_as_text(obj.get("value"))?;
                let label = value_as_text(obj.get("label"))
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| value.clone());
                Some(ChoiceOption { value, label })
            }
            other => value_as_text(Some(other)).map(ChoiceOption::new),
        }
    }
}

/// Kind-specific parameters of an input field
#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Text {
        placeholder: Option<String>,
        default: Option<String>,
    },
    Number {
        placeholder: Option<String>,
        default: Option<String>,
    },
    Radio {
        options: Vec<ChoiceOption>,
        default: Option<String>,
    },
    Select {
        options: Vec<ChoiceOption>,
        default: Option<String>,
    },
    Slider {
        min: f64,
        max: f64,
        step: f64,
        default: Option<f64>,
    },
    Color {
        default: Option<String>,
    },
    Checkbox {
        default: bool,
    },
}

impl FieldKind {
    /// Wire tag of this kind
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Text { .. } => "text",
            FieldKind::Number { .. } => "number",
            FieldKind::Radio { .. } => "radio",
            FieldKind::Select { .. } => "select",
            FieldKind::Slider { .. } => "slider",
            FieldKind::Color { .. } => "color",
            FieldKind::Checkbox { .. } => "checkbox",
        }
    }
}

/// One field of the input popup
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSchema {
    /// Form key, unique within one popup
    pub name: String,
    pub label: Option<String>,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        FieldSchema {
            name: name.into(),
            label: None,
            required: false,
            kind,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Decode one field definition
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| NuiError::MalformedSchema(format!("field is not an object: {}", value)))?;

        let name = value_as_text(obj.get("name"))
            .filter(|n| !n.is_empty())
            .ok_or_else(|| NuiError::InvalidField {
                name: String::new(),
                reason: "missing name".to_string(),
            })?;
        let label = first_text(obj, &["label"]);
        let placeholder = first_text(obj, &["placeholder"]);
        let default = obj.get("default").filter(|d| !d.is_null());
        let kind_tag = value_as_text(obj.get("type")).unwrap_or_default();

        let invalid = |reason: &str| NuiError::InvalidField {
            name: name.clone(),
            reason: reason.to_string(),
        };

        let kind = match kind_tag.as_str() {
            "text" => FieldKind::Text {
                placeholder,
                default: value_as_text(default),
            },
            "number" => FieldKind::Number {
                placeholder,
                default: value_as_text(default),
            },
            "radio" | "select" => {
                let options: Vec<ChoiceOption> = obj
                    .get("options")
                    .and_then(Value::as_array)
                    .ok_or_else(|| invalid("options must be an array"))?
                    .iter()
                    .filter_map(ChoiceOption::from_value)
                    .collect();
                if options.is_empty() {
                    return Err(invalid("at least one option is required"));
                }
                let default = value_as_text(default);
                if kind_tag == "radio" {
                    FieldKind::Radio { options, default }
                } else {
                    FieldKind::Select { options, default }
                }
            }
            "slider" => {
                let min = value_as_f64(obj.get("min")).ok_or_else(|| invalid("min is required"))?;
                let max = value_as_f64(obj.get("max")).ok_or_else(|| invalid("max is required"))?;
                if min > max {
                    return Err(invalid("min is greater than max"));
                }
                let step = value_as_f64(obj.get("step"))
                    .filter(|s| *s > 0.0)
                    .unwrap_or(1.0);
                FieldKind::Slider {
                    min,
                    max,
                    step,
                    default: value_as_f64(default),
                }
            }
            "color" => FieldKind::Color {
                default: value_as_text(default),
            },
            "checkbox" => FieldKind::Checkbox {
                default: value_is_truthy(default),
            },
            other => {
                return Err(NuiError::UnsupportedFieldKind {
                    name,
                    kind: other.to_string(),
                })
            }
        };

        Ok(FieldSchema {
            name,
            label,
            required: value_is_truthy(obj.get("required")),
            kind,
        })
    }

    /// Decode a whole popup schema: a non-empty array of uniquely named fields
    pub fn list_from_value(value: &Value) -> Result<Vec<Self>> {
        let fields = value
            .as_array()
            .ok_or_else(|| NuiError::MalformedSchema(format!("expected an array, got {}", value)))?;
        if fields.is_empty() {
            return Err(NuiError::MalformedSchema("no fields".to_string()));
        }

        let mut seen = HashSet::new();
        fields
            .iter()
            .map(|field| {
                let schema = FieldSchema::from_value(field)?;
                if !seen.insert(schema.name.clone()) {
                    return Err(NuiError::DuplicateField(schema.name));
                }
                Ok(schema)
            })
            .collect()
    }
}

// ============================================================
// RESULTS
// ============================================================

/// A submitted field value
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormValue {
    /// Raw string value, never coerced
    Text(String),
    Color(ColorValue),
    Flag(bool),
}

/// Field name to submitted value
pub type FormResult = BTreeMap<String, FormValue>;
