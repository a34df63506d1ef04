//! Field widgets of the input popup
//!
//! One widget per field schema. A widget owns its current value and knows
//! how to accept user input, what readout it shows, and what it submits.

use crate::color::{normalize_hex, ColorValue, DEFAULT_COLOR};
use crate::error::{NuiError, Result};
use crate::protocol::{ChoiceOption, FieldKind, FieldSchema, FormValue};
use crate::render::format_number;

/// Current value of a widget
#[derive(Clone, Debug, PartialEq)]
pub enum WidgetState {
    /// Text and number inputs
    Text(String),
    /// Index of the checked radio option
    Radio(Option<usize>),
    /// Index of the selected option
    Select(usize),
    Slider(f64),
    /// Lowercase `#rrggbb`
    Color(String),
    Checkbox(bool),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Widget {
    pub schema: FieldSchema,
    pub state: WidgetState,
}

fn option_index(options: &[ChoiceOption], value: Option<&str>) -> Option<usize> {
    let value = value?;
    options.iter().position(|o| o.value == value)
}

/// Clamp to [min, max] and snap to the step grid anchored at min
fn snap_to_range(value: f64, min: f64, max: f64, step: f64) -> f64 {
    let steps = ((value - min) / step).round();
    let snapped = (min + steps * step).clamp(min, max);
    let scaled = snapped * 1e10;
    if scaled.is_finite() {
        scaled.round() / 1e10
    } else {
        snapped
    }
}

/// Number inputs keep only text that parses as a number
fn sanitize_number(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.parse::<f64>().is_ok_and(|n| n.is_finite()) {
        trimmed.to_string()
    } else {
        String::new()
    }
}

impl Widget {
    pub fn new(schema: FieldSchema) -> Self {
        let state = match &schema.kind {
            FieldKind::Text { default, .. } => WidgetState::Text(default.clone().unwrap_or_default()),
            FieldKind::Number { default, .. } => {
                WidgetState::Text(default.as_deref().map(sanitize_number).unwrap_or_default())
            }
            FieldKind::Radio { options, default } => {
                WidgetState::Radio(option_index(options, default.as_deref()))
            }
            FieldKind::Select { options, default } => {
                WidgetState::Select(option_index(options, default.as_deref()).unwrap_or(0))
            }
            FieldKind::Slider {
                min,
                max,
                step,
                default,
            } => WidgetState::Slider(snap_to_range(default.unwrap_or(*min), *min, *max, *step)),
            FieldKind::Color { default } => {
                let color = match default.as_deref().map(normalize_hex) {
                    Some(Ok(hex)) => hex,
                    Some(Err(e)) => {
                        tracing::warn!(field = %schema.name, error = %e, "Ignoring color default");
                        DEFAULT_COLOR.to_string()
                    }
                    None => DEFAULT_COLOR.to_string(),
                };
                WidgetState::Color(color)
            }
            FieldKind::Checkbox { default } => WidgetState::Checkbox(*default),
        };
        Widget { schema, state }
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    /// Apply user input. Rejected input leaves the value unchanged.
    pub fn set(&mut self, raw: &str) -> Result<()> {
        let invalid = |reason: String| NuiError::InvalidField {
            name: self.schema.name.clone(),
            reason,
        };

        let next = match &self.schema.kind {
            FieldKind::Text { .. } => WidgetState::Text(raw.to_string()),
            FieldKind::Number { .. } => WidgetState::Text(sanitize_number(raw)),
            FieldKind::Radio { options, .. } => {
                let index = option_index(options, Some(raw))
                    .ok_or_else(|| invalid(format!("'{}' is not an option", raw)))?;
                WidgetState::Radio(Some(index))
            }
            FieldKind::Select { options, .. } => {
                let index = option_index(options, Some(raw))
                    .ok_or_else(|| invalid(format!("'{}' is not an option", raw)))?;
                WidgetState::Select(index)
            }
            FieldKind::Slider { min, max, step, .. } => {
                let value: f64 = raw
                    .trim()
                    .parse()
                    .ok()
                    .filter(|v: &f64| v.is_finite())
                    .ok_or_else(|| invalid(format!("'{}' is not a number", raw)))?;
                WidgetState::Slider(snap_to_range(value, *min, *max, *step))
            }
            FieldKind::Color { .. } => WidgetState::Color(normalize_hex(raw)?),
            FieldKind::Checkbox { .. } => {
                WidgetState::Checkbox(matches!(raw.trim(), "true" | "on" | "1" | "checked"))
            }
        };

        self.state = next;
        Ok(())
    }

    /// Raw value as the element's value attribute shows it
    pub fn raw_value(&self) -> String {
        match (&self.state, &self.schema.kind) {
            (WidgetState::Text(text), _) => text.clone(),
            (WidgetState::Radio(Some(i)), FieldKind::Radio { options, .. }) => {
                options.get(*i).map(|o| o.value.clone()).unwrap_or_default()
            }
            (WidgetState::Select(i), FieldKind::Select { options, .. }) => {
                options.get(*i).map(|o| o.value.clone()).unwrap_or_default()
            }
            (WidgetState::Slider(v), _) => format_number(*v),
            (WidgetState::Color(hex), _) => hex.clone(),
            (WidgetState::Checkbox(checked), _) => checked.to_string(),
            _ => String::new(),
        }
    }

    /// Live readout shown next to sliders and color pickers
    pub fn readout(&self) -> Option<String> {
        match &self.state {
            WidgetState::Slider(v) => Some(format_number(*v)),
            WidgetState::Color(hex) => ColorValue::from_hex(hex).ok().map(|c| c.preview()),
            _ => None,
        }
    }

    /// Value this widget contributes on submit. An unchecked radio group
    /// contributes nothing.
    pub fn submitted(&self) -> Option<FormValue> {
        match &self.state {
            WidgetState::Radio(None) => None,
            WidgetState::Color(hex) => ColorValue::from_hex(hex).ok().map(FormValue::Color),
            WidgetState::Checkbox(checked) => Some(FormValue::Flag(*checked)),
            _ => Some(FormValue::Text(self.raw_value())),
        }
    }

    /// Whether a `required` constraint blocks submission
    pub fn blocks_submit(&self) -> bool {
        if !self.schema.required {
            return false;
        }
        match &self.state {
            WidgetState::Text(text) => text.is_empty(),
            WidgetState::Radio(checked) => checked.is_none(),
            WidgetState::Checkbox(checked) => !checked,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider(default: Option<f64>) -> Widget {
        Widget::new(FieldSchema::new(
            "volume",
            FieldKind::Slider {
                min: 0.0,
                max: 100.0,
                step: 5.0,
                default,
            },
        ))
    }

    #[test]
    fn slider_starts_at_min_without_default() {
        let w = slider(None);
        assert_eq!(w.state, WidgetState::Slider(0.0));
        assert_eq!(w.readout().as_deref(), Some("0"));
    }

    #[test]
    fn slider_clamps_and_snaps() {
        let mut w = slider(Some(42.0));
        assert_eq!(w.raw_value(), "40");
        w.set("250").unwrap();
        assert_eq!(w.raw_value(), "100");
        w.set("13").unwrap();
        assert_eq!(w.readout().as_deref(), Some("15"));
        assert!(w.set("loud").is_err());
        assert_eq!(w.raw_value(), "15");
    }

    #[test]
    fn number_input_drops_non_numeric_text() {
        let mut w = Widget::new(FieldSchema::new(
            "qty",
            FieldKind::Number { placeholder: None, default: None },
        ));
        w.set("5").unwrap();
        assert_eq!(w.submitted(), Some(FormValue::Text("5".to_string())));
        w.set("five").unwrap();
        assert_eq!(w.raw_value(), "");
    }

    #[test]
    fn radio_default_and_selection() {
        let schema = FieldSchema::new(
            "size",
            FieldKind::Radio {
                options: vec![ChoiceOption::new("s"), ChoiceOption::new("m")],
                default: Some("m".to_string()),
            },
        );
        let mut w = Widget::new(schema);
        assert_eq!(w.state, WidgetState::Radio(Some(1)));
        assert!(w.set("xl").is_err());
        w.set("s").unwrap();
        assert_eq!(w.submitted(), Some(FormValue::Text("s".to_string())));
    }

    #[test]
    fn unchecked_radio_submits_nothing_and_blocks_when_required() {
        let schema = FieldSchema::new(
            "size",
            FieldKind::Radio {
                options: vec![ChoiceOption::new("s")],
                default: None,
            },
        )
        .required();
        let w = Widget::new(schema);
        assert_eq!(w.submitted(), None);
        assert!(w.blocks_submit());
    }

    #[test]
    fn select_falls_back_to_first_option() {
        let w = Widget::new(FieldSchema::new(
            "job",
            FieldKind::Select {
                options: vec![ChoiceOption::new("police"), ChoiceOption::new("ems")],
                default: Some("mechanic".to_string()),
            },
        ));
        assert_eq!(w.raw_value(), "police");
    }

    #[test]
    fn color_submits_hex_and_rgb() {
        let mut w = Widget::new(FieldSchema::new("paint", FieldKind::Color { default: None }));
        assert_eq!(w.raw_value(), DEFAULT_COLOR);
        w.set("#FF0000").unwrap();
        assert_eq!(w.readout().as_deref(), Some("#FF0000 (RGB(255, 0, 0))"));
        assert_eq!(
            w.submitted(),
            Some(FormValue::Color(ColorValue {
                hex: "#FF0000".to_string(),
                rgb: "RGB(255, 0, 0)".to_string(),
            }))
        );
        assert!(w.set("red").is_err());
    }

    #[test]
    fn slider_with_huge_bounds_stays_finite() {
        let mut w = Widget::new(FieldSchema::new(
            "v",
            FieldKind::Slider {
                min: 0.0,
                max: 1e300,
                step: 1.0,
                default: Some(1e299),
            },
        ));
        assert_eq!(w.state, WidgetState::Slider(1e299));
        assert_ne!(w.readout().as_deref(), Some("inf"));
        w.set("1e300").unwrap();
        assert_eq!(w.state, WidgetState::Slider(1e300));
        assert_ne!(w.raw_value(), "inf");
    }

    #[test]
    fn checkbox_submits_flag() {
        let mut w = Widget::new(FieldSchema::new("agree", FieldKind::Checkbox { default: false }));
        assert_eq!(w.submitted(), Some(FormValue::Flag(false)));
        w.set("on").unwrap();
        assert_eq!(w.submitted(), Some(FormValue::Flag(true)));
    }
}
