//! Host message and callback types
//!
//! Inbound messages arrive from the host as JSON objects discriminated by an
//! `action` field. Outbound callbacks are POSTed to `<base>/<endpoint>`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::FormResult;

pub const ENDPOINT_CLICKED_BUTTON: &str = "clickedButton";
pub const ENDPOINT_CLOSE_MENU: &str = "closeMenu";
pub const ENDPOINT_INPUT_RESULT: &str = "inputResult";

/// Which surface a message targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    Menu,
    Popup,
}

impl SurfaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Menu => "menu",
            SurfaceKind::Popup => "popup",
        }
    }
}

/// Host → UI message
///
/// # Example
/// ```json
/// {"action":"SHOW_INPUT","cbId":7,"data":[{"type":"number","name":"qty"}]}
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum HostMessage {
    /// Open (or re-render) the list menu
    #[serde(rename = "OPEN_MENU")]
    OpenMenu {
        #[serde(default)]
        data: Value,
    },

    /// Same as OPEN_MENU
    #[serde(rename = "SHOW_HEADER")]
    ShowHeader {
        #[serde(default)]
        data: Value,
    },

    #[serde(rename = "CLOSE_MENU")]
    CloseMenu {},

    /// Open the input popup. `cbId` is echoed back in the result.
    #[serde(rename = "SHOW_INPUT")]
    ShowInput {
        #[serde(default)]
        data: Value,
        #[serde(rename = "cbId", default, skip_serializing_if = "Option::is_none")]
        cb_id: Option<Value>,
    },
}

impl HostMessage {
    pub fn action(&self) -> &'static str {
        match self {
            HostMessage::OpenMenu { .. } => "OPEN_MENU",
            HostMessage::ShowHeader { .. } => "SHOW_HEADER",
            HostMessage::CloseMenu {} => "CLOSE_MENU",
            HostMessage::ShowInput { .. } => "SHOW_INPUT",
        }
    }

    /// Surface this message opens, if it opens one
    pub fn opens(&self) -> Option<SurfaceKind> {
        match self {
            HostMessage::OpenMenu { .. } | HostMessage::ShowHeader { .. } => {
                Some(SurfaceKind::Menu)
            }
            HostMessage::ShowInput { .. } => Some(SurfaceKind::Popup),
            HostMessage::CloseMenu {} => None,
        }
    }
}

/// UI → host callback
#[derive(Clone, Debug, PartialEq)]
pub enum Callback {
    /// 1-based id of the clicked item
    ClickedButton { id: usize },
    /// The menu was dismissed by the user
    CloseMenu,
    /// Outcome of an input popup. `result` is None on cancel or failure;
    /// `error` is set only when the popup could not be shown.
    InputResult {
        cb_id: Option<Value>,
        result: Option<FormResult>,
        error: Option<String>,
    },
}

#[derive(Serialize)]
struct InputResultBody<'a> {
    #[serde(rename = "cbId")]
    cb_id: Option<&'a Value>,
    result: Option<&'a FormResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl Callback {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Callback::ClickedButton { .. } => ENDPOINT_CLICKED_BUTTON,
            Callback::CloseMenu => ENDPOINT_CLOSE_MENU,
            Callback::InputResult { .. } => ENDPOINT_INPUT_RESULT,
        }
    }

    /// JSON body of the POST; `closeMenu` carries none
    pub fn body(&self) -> Option<Value> {
        match self {
            Callback::ClickedButton { id } => Some(Value::from(*id)),
            Callback::CloseMenu => None,
            Callback::InputResult {
                cb_id,
                result,
                error,
            } => serde_json::to_value(InputResultBody {
                cb_id: cb_id.as_ref(),
                result: result.as_ref(),
                error: error.as_deref(),
            })
            .ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FormValue;
    use serde_json::json;

    #[test]
    fn open_menu_deserializes() {
        let msg: HostMessage =
            serde_json::from_value(json!({"action": "OPEN_MENU", "data": [{"header": "A"}]}))
                .unwrap();
        assert_eq!(msg.opens(), Some(SurfaceKind::Menu));
        match msg {
            HostMessage::OpenMenu { data } => assert_eq!(data, json!([{"header": "A"}])),
            other => panic!("Expected OpenMenu, got {:?}", other),
        }
    }

    #[test]
    fn close_menu_ignores_extra_fields() {
        let msg: HostMessage =
            serde_json::from_value(json!({"action": "CLOSE_MENU", "data": null})).unwrap();
        assert_eq!(msg, HostMessage::CloseMenu {});
        assert_eq!(msg.opens(), None);
    }

    #[test]
    fn show_input_keeps_opaque_cb_id() {
        let msg: HostMessage = serde_json::from_value(json!({
            "action": "SHOW_INPUT", "cbId": "cb-3", "data": []
        }))
        .unwrap();
        match msg {
            HostMessage::ShowInput { cb_id, .. } => assert_eq!(cb_id, Some(json!("cb-3"))),
            other => panic!("Expected ShowInput, got {:?}", other),
        }
    }

    #[test]
    fn show_input_without_data_defaults_to_null() {
        let msg: HostMessage = serde_json::from_value(json!({"action": "SHOW_INPUT"})).unwrap();
        match msg {
            HostMessage::ShowInput { data, cb_id } => {
                assert!(data.is_null());
                assert!(cb_id.is_none());
            }
            other => panic!("Expected ShowInput, got {:?}", other),
        }
    }

    #[test]
    fn clicked_button_body_is_bare_integer() {
        let cb = Callback::ClickedButton { id: 3 };
        assert_eq!(cb.endpoint(), "clickedButton");
        assert_eq!(cb.body(), Some(json!(3)));
    }

    #[test]
    fn close_menu_has_no_body() {
        assert_eq!(Callback::CloseMenu.endpoint(), "closeMenu");
        assert_eq!(Callback::CloseMenu.body(), None);
    }

    #[test]
    fn cancelled_input_result_posts_null() {
        let cb = Callback::InputResult {
            cb_id: Some(json!(12)),
            result: None,
            error: None,
        };
        assert_eq!(cb.body(), Some(json!({"cbId": 12, "result": null})));
    }

    #[test]
    fn input_result_carries_values_and_error() {
        let mut result = FormResult::new();
        result.insert("qty".to_string(), FormValue::Text("5".to_string()));
        let ok = Callback::InputResult {
            cb_id: Some(json!(1)),
            result: Some(result),
            error: None,
        };
        assert_eq!(ok.body(), Some(json!({"cbId": 1, "result": {"qty": "5"}})));

        let failed = Callback::InputResult {
            cb_id: None,
            result: None,
            error: Some("unsupported field type 'date' for field 'when'".to_string()),
        };
        assert_eq!(
            failed.body(),
            Some(json!({
                "cbId": null,
                "result": null,
                "error": "unsupported field type 'date' for field 'when'"
            }))
        );
    }
}
