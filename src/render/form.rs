//! Input popup markup

use std::fmt::Write;

use super::html::{escape_attr, escape_html, format_number};
use crate::input_form::{Widget, WidgetState};
use crate::protocol::FieldKind;

const HIDDEN_POPUP: &str = r#"<div id="input-popup" class="hidden"><form id="input-form"></form></div>"#;

/// Markup of the popup while hidden
pub fn render_hidden_popup() -> String {
    HIDDEN_POPUP.to_string()
}

/// Markup of the shown popup: one wrapper per widget, then submit and cancel
pub fn render_popup(widgets: &[Widget]) -> String {
    let mut html = String::from(r#"<div id="input-popup" class=""><form id="input-form">"#);
    for widget in widgets {
        html.push_str(&render_widget(widget));
    }
    html.push_str(
        r#"<div class="input-actions"><button type="submit" class="input-submit">Submit</button><button type="button" class="input-cancel">Cancel</button></div>"#,
    );
    html.push_str("</form></div>");
    html
}

fn title_label(label: Option<&str>) -> String {
    match label.filter(|l| !l.is_empty()) {
        Some(label) => format!(r#"<label class="input-label">{}</label>"#, escape_html(label)),
        None => String::new(),
    }
}

fn required_attr(widget: &Widget) -> &'static str {
    if widget.schema.required {
        " required"
    } else {
        ""
    }
}

fn render_widget(widget: &Widget) -> String {
    let schema = &widget.schema;
    let name = escape_attr(&schema.name);
    let label = schema.label.as_deref();
    let mut html = String::new();

    match (&schema.kind, &widget.state) {
        (FieldKind::Radio { options, .. }, WidgetState::Radio(checked)) => {
            html.push_str(r#"<div class="input-wrapper">"#);
            html.push_str(&title_label(label));
            for (index, option) in options.iter().enumerate() {
                let checked = if *checked == Some(index) { " checked" } else { "" };
                let _ = write!(
                    html,
                    r#"<label class="radio-wrapper"><input type="radio" name="{}" value="{}" class="radio-input"{}{}><span class="radio-label">{}</span></label>"#,
                    name,
                    escape_attr(&option.value),
                    checked,
                    required_attr(widget),
                    escape_html(&option.label),
                );
            }
            html.push_str("</div>");
        }
        (FieldKind::Slider { min, max, step, .. }, WidgetState::Slider(value)) => {
            html.push_str(r#"<div class="input-wrapper">"#);
            html.push_str(&title_label(label));
            let _ = write!(
                html,
                r#"<div class="slider-values"><span class="slider-min">{min}</span><span class="slider-current">{current}</span><span class="slider-max">{max}</span></div>"#,
                min = format_number(*min),
                current = format_number(*value),
                max = format_number(*max),
            );
            let _ = write!(
                html,
                r#"<input type="range" name="{}" class="input-field" min="{}" max="{}" step="{}" value="{}"{}>"#,
                name,
                format_number(*min),
                format_number(*max),
                format_number(*step),
                format_number(*value),
                required_attr(widget),
            );
            html.push_str("</div>");
        }
        (FieldKind::Color { .. }, WidgetState::Color(hex)) => {
            html.push_str(r#"<div class="input-wrapper color-picker">"#);
            html.push_str(&title_label(label));
            let _ = write!(
                html,
                r#"<input type="color" name="{}" class="input-field" value="{}"{}><span class="color-preview">{}</span>"#,
                name,
                escape_attr(hex),
                required_attr(widget),
                escape_html(&widget.readout().unwrap_or_default()),
            );
            html.push_str("</div>");
        }
        (FieldKind::Checkbox { .. }, WidgetState::Checkbox(checked)) => {
            let _ = write!(
                html,
                r#"<div class="input-wrapper"><label class="checkbox-wrapper"><input type="checkbox" name="{}" class="input-field"{}{}><span class="input-label">{}</span></label></div>"#,
                name,
                if *checked { " checked" } else { "" },
                required_attr(widget),
                escape_html(label.unwrap_or(&schema.name)),
            );
        }
        (FieldKind::Select { options, .. }, WidgetState::Select(selected)) => {
            let _ = write!(
                html,
                r#"<div class="input-wrapper"><label class="input-label">{}</label><select name="{}" class="input-field"{}>"#,
                escape_html(common_label(label, &schema.name)),
                name,
                required_attr(widget),
            );
            for (index, option) in options.iter().enumerate() {
                let _ = write!(
                    html,
                    r#"<option value="{}"{}>{}</option>"#,
                    escape_attr(&option.value),
                    if *selected == index { " selected" } else { "" },
                    escape_html(&option.label),
                );
            }
            html.push_str("</select></div>");
        }
        (kind, state) => {
            let (input_type, placeholder) = match kind {
                FieldKind::Number { placeholder, .. } => ("number", placeholder.as_deref()),
                FieldKind::Text { placeholder, .. } => ("text", placeholder.as_deref()),
                _ => {
                    tracing::warn!(field = %schema.name, state = ?state, "Widget state does not match its field kind");
                    return String::new();
                }
            };
            let placeholder = label.or(placeholder).unwrap_or("");
            let _ = write!(
                html,
                r#"<div class="input-wrapper"><label class="input-label">{}</label><input type="{}" name="{}" class="input-field" placeholder="{}" value="{}"{}></div>"#,
                escape_html(common_label(label, &schema.name)),
                input_type,
                name,
                escape_attr(placeholder),
                escape_attr(&widget.raw_value()),
                required_attr(widget),
            );
        }
    }

    html
}

/// Label of plain inputs: label, else name, else "Input"
fn common_label<'a>(label: Option<&'a str>, name: &'a str) -> &'a str {
    label
        .filter(|l| !l.is_empty())
        .or(Some(name).filter(|n| !n.is_empty()))
        .unwrap_or("Input")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ChoiceOption, FieldSchema};

    fn widget(schema: FieldSchema) -> Widget {
        Widget::new(schema)
    }

    #[test]
    fn hidden_popup_is_empty() {
        assert!(render_hidden_popup().contains(r#"class="hidden""#));
    }

    #[test]
    fn text_field_label_falls_back_to_name() {
        let w = widget(FieldSchema::new(
            "plate",
            FieldKind::Text { placeholder: Some("ABC 123".to_string()), default: None },
        ));
        let html = render_popup(&[w]);
        assert!(html.contains(r#"<label class="input-label">plate</label>"#));
        assert!(html.contains(r#"<input type="text" name="plate" class="input-field" placeholder="ABC 123" value="">"#));
        assert!(html.contains(r#"class="input-cancel""#));
    }

    #[test]
    fn required_number_field() {
        let w = widget(
            FieldSchema::new("qty", FieldKind::Number { placeholder: None, default: None })
                .with_label("Quantity")
                .required(),
        );
        let html = render_popup(&[w]);
        assert!(html.contains(r#"type="number" name="qty" class="input-field" placeholder="Quantity" value="" required>"#));
    }

    #[test]
    fn radio_group_marks_default() {
        let w = widget(
            FieldSchema::new(
                "size",
                FieldKind::Radio {
                    options: vec![
                        ChoiceOption::new("s"),
                        ChoiceOption { value: "m".to_string(), label: "Medium".to_string() },
                    ],
                    default: Some("m".to_string()),
                },
            )
            .with_label("Size"),
        );
        let html = render_popup(&[w]);
        assert!(html.contains(r#"<label class="input-label">Size</label>"#));
        assert!(html.contains(r#"value="s" class="radio-input"><span class="radio-label">s</span>"#));
        assert!(html.contains(r#"value="m" class="radio-input" checked><span class="radio-label">Medium</span>"#));
    }

    #[test]
    fn select_lists_options_in_order() {
        let w = widget(FieldSchema::new(
            "job",
            FieldKind::Select {
                options: vec![ChoiceOption::new("police"), ChoiceOption::new("ems")],
                default: Some("ems".to_string()),
            },
        ));
        let html = render_popup(&[w]);
        let police = html.find(r#"<option value="police">police</option>"#).unwrap();
        let ems = html.find(r#"<option value="ems" selected>ems</option>"#).unwrap();
        assert!(police < ems);
    }

    #[test]
    fn slider_shows_min_current_max() {
        let w = widget(FieldSchema::new(
            "volume",
            FieldKind::Slider { min: 0.0, max: 100.0, step: 1.0, default: None },
        ));
        let html = render_popup(&[w]);
        assert!(html.contains(r#"<span class="slider-min">0</span><span class="slider-current">0</span><span class="slider-max">100</span>"#));
        assert!(html.contains(r#"type="range" name="volume" class="input-field" min="0" max="100" step="1" value="0">"#));
    }

    #[test]
    fn color_picker_shows_preview() {
        let w = widget(FieldSchema::new(
            "paint",
            FieldKind::Color { default: Some("#00FF00".to_string()) },
        ));
        let html = render_popup(&[w]);
        assert!(html.contains(r#"<div class="input-wrapper color-picker">"#));
        assert!(html.contains(r##"value="#00ff00""##));
        assert!(html.contains(r#"<span class="color-preview">#00FF00 (RGB(0, 255, 0))</span>"#));
    }
}
