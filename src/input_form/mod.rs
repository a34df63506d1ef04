//! Input Form Controller
//!
//! Owns the dynamic popup: Hidden → Shown → Hidden. A SHOW_INPUT payload is
//! decoded into one widget per field; user input updates widgets and the
//! markup is rebuilt; submit or cancel produces the single `inputResult`
//! callback for the stored `cbId` and hides the popup.

mod widget;

pub use widget::{Widget, WidgetState};

use serde_json::Value;
use tracing::{debug, error, info};

use crate::error::{NuiError, Result};
use crate::logging;
use crate::protocol::{Callback, FieldSchema, FormResult};
use crate::render::{render_hidden_popup, render_popup};

pub struct InputForm {
    widgets: Vec<Widget>,
    /// Correlates this popup with its one result post
    cb_id: Option<Value>,
    shown: bool,
    markup: String,
}

impl Default for InputForm {
    fn default() -> Self {
        Self::new()
    }
}

impl InputForm {
    pub fn new() -> Self {
        InputForm {
            widgets: Vec::new(),
            cb_id: None,
            shown: false,
            markup: render_hidden_popup(),
        }
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn cb_id(&self) -> Option<&Value> {
        self.cb_id.as_ref()
    }

    /// Show the popup for `data`, replacing any popup already shown.
    ///
    /// `cb_id` is stored before the schema is checked. On error the popup
    /// stays hidden; the caller decides whether the host hears about it.
    pub fn open(&mut self, data: &Value, cb_id: Option<Value>) -> Result<()> {
        self.cb_id = cb_id;
        self.widgets.clear();
        self.shown = false;
        self.markup = render_hidden_popup();

        let fields = match FieldSchema::list_from_value(data) {
            Ok(fields) => fields,
            Err(e) => {
                if let NuiError::MalformedSchema(_) = e {
                    error!(error = %e, config = %data, "Invalid input config");
                }
                return Err(e);
            }
        };

        self.widgets = fields.into_iter().map(Widget::new).collect();
        self.shown = true;
        self.rerender();

        info!(
            event_type = "ui_event",
            surface = "popup",
            field_count = self.widgets.len(),
            cb_id = ?self.cb_id,
            "Input popup shown"
        );
        Ok(())
    }

    /// Apply user input to the named field and refresh its readout
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        if !self.shown {
            return Err(NuiError::NotOpen("popup"));
        }
        let widget = self
            .widgets
            .iter_mut()
            .find(|w| w.name() == name)
            .ok_or_else(|| NuiError::UnknownField(name.to_string()))?;
        widget.set(value)?;
        debug!(field = name, value = %widget.raw_value(), "Field updated");
        self.rerender();
        Ok(())
    }

    /// Live readout of a slider or color field
    pub fn readout(&self, name: &str) -> Option<String> {
        self.widgets.iter().find(|w| w.name() == name)?.readout()
    }

    /// Collect one value per named field
    pub fn collect(&self) -> FormResult {
        self.widgets
            .iter()
            .filter_map(|w| w.submitted().map(|v| (w.name().to_string(), v)))
            .collect()
    }

    /// Submit the form. A required field left empty refuses the submit and
    /// keeps the popup shown, with no callback.
    pub fn submit(&mut self) -> Result<Callback> {
        if !self.shown {
            return Err(NuiError::NotOpen("popup"));
        }
        if let Some(blocking) = self.widgets.iter().find(|w| w.blocks_submit()) {
            return Err(NuiError::RequiredFieldMissing(blocking.name().to_string()));
        }

        let result = self.collect();
        logging::log_ui_event("popup", "submit", None);
        Ok(self.finish(Some(result), None))
    }

    /// Cancel control: result is null
    pub fn cancel(&mut self) -> Result<Callback> {
        if !self.shown {
            return Err(NuiError::NotOpen("popup"));
        }
        logging::log_ui_event("popup", "cancel", None);
        Ok(self.finish(None, None))
    }

    /// Callback releasing the host when the popup could not be shown
    pub fn failure(&mut self, error: &NuiError) -> Callback {
        self.finish(None, Some(error.to_string()))
    }

    pub fn hide(&mut self) {
        self.shown = false;
        self.widgets.clear();
        self.markup = render_hidden_popup();
    }

    fn finish(&mut self, result: Option<FormResult>, error: Option<String>) -> Callback {
        let callback = Callback::InputResult {
            cb_id: self.cb_id.take(),
            result,
            error,
        };
        self.hide();
        callback
    }

    fn rerender(&mut self) {
        self.markup = render_popup(&self.widgets);
    }
}
