//! Parsing of inbound host messages
//!
//! Hosts send loosely shaped JSON and may add actions this UI does not know.
//! `classify_message` sorts every input instead of failing so the caller can
//! log and move on.

use serde_json::Value;

use super::message::HostMessage;

/// Maximum length for raw JSON in logs (menus can carry large params)
const MAX_RAW_LOG_PREVIEW: usize = 200;

/// Get a truncated preview of raw JSON for logging
pub fn log_preview(raw: &str) -> (&str, usize) {
    let len = raw.len();
    if len > MAX_RAW_LOG_PREVIEW {
        let mut end = MAX_RAW_LOG_PREVIEW;
        while !raw.is_char_boundary(end) {
            end -= 1;
        }
        (&raw[..end], len)
    } else {
        (raw, len)
    }
}

/// Result type for graceful message parsing
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed a known action
    Ok(HostMessage),
    /// Message has no "action" field
    MissingAction {
        /// Truncated raw JSON for debugging
        raw: String,
    },
    /// Valid JSON with an "action" we don't recognize (ignored by the UI)
    UnknownAction { action: String, raw: String },
    /// Known action but invalid payload
    InvalidPayload {
        action: String,
        error: String,
        raw: String,
    },
}

/// Classify an already-decoded host message
///
/// - Missing "action" field → `MissingAction`
/// - Unknown action value → `UnknownAction`
/// - Known action with invalid payload → `InvalidPayload`
pub fn classify_message(value: Value) -> ParseResult {
    let raw = value.to_string();
    let (preview, _) = log_preview(&raw);
    let preview = preview.to_string();

    let action: String = match value.get("action").and_then(|a| a.as_str()) {
        Some(a) => a.to_string(),
        None => return ParseResult::MissingAction { raw: preview },
    };

    match serde_json::from_value::<HostMessage>(value) {
        Ok(msg) => ParseResult::Ok(msg),
        Err(e) => {
            let error_str = e.to_string();
            if error_str.contains("unknown variant") {
                ParseResult::UnknownAction {
                    action,
                    raw: preview,
                }
            } else {
                ParseResult::InvalidPayload {
                    action,
                    error: error_str,
                    raw: preview,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_log_preview_truncation() {
        let (preview, len) = log_preview("hello");
        assert_eq!(preview, "hello");
        assert_eq!(len, 5);

        let long = "a".repeat(500);
        let (preview, len) = log_preview(&long);
        assert_eq!(preview.len(), 200);
        assert_eq!(len, 500);
    }

    #[test]
    fn test_log_preview_respects_char_boundaries() {
        let long = "é".repeat(150);
        let (preview, _) = log_preview(&long);
        assert!(preview.len() <= 200);
        assert!(preview.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_known_action() {
        match classify_message(json!({"action": "CLOSE_MENU"})) {
            ParseResult::Ok(HostMessage::CloseMenu {}) => {}
            other => panic!("Expected CloseMenu, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_action() {
        match classify_message(json!({"action": "SHOW_TOAST", "data": "hi"})) {
            ParseResult::UnknownAction { action, raw } => {
                assert_eq!(action, "SHOW_TOAST");
                assert!(raw.contains("SHOW_TOAST"));
            }
            other => panic!("Expected UnknownAction, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_action() {
        assert!(matches!(
            classify_message(json!({"data": []})),
            ParseResult::MissingAction { .. }
        ));
    }

    #[test]
    fn test_payload_fields_are_lenient() {
        match classify_message(json!({"action": "OPEN_MENU", "data": 1, "extra": {}})) {
            ParseResult::Ok(_) => {}
            other => panic!("Expected lenient OpenMenu, got {:?}", other),
        }
        match classify_message(json!({"action": "SHOW_INPUT", "cbId": 1, "data": []})) {
            ParseResult::Ok(msg) => assert_eq!(msg.action(), "SHOW_INPUT"),
            other => panic!("Expected ShowInput, got {:?}", other),
        }
    }
}
