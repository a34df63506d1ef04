//! JSONL command driver.
//!
//! Lets a host bridge, a test harness or a person at a terminal drive the
//! overlay through stdin. One JSON object per line:
//!
//! ```json
//! {"type": "host", "message": {"action": "OPEN_MENU", "data": [{"header": "Garage"}]}}
//! {"type": "search", "text": "gar"}
//! {"type": "click", "id": 1}
//! {"type": "key", "key": "Escape"}
//! {"type": "input", "name": "qty", "value": "5"}
//! {"type": "submit"}
//! {"type": "cancel"}
//! {"type": "render"}
//! ```
//!
//! `click` takes the same 1-based id the host receives in `clickedButton`.
//! Markup records are written to stdout as
//! `{"type":"markup","surface":..,"html":..}`.

use std::io::Write;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::{ErrorSeverity, Result};
use crate::protocol::{classify_message, log_preview, ParseResult};
use crate::session::{UiEvent, UiSession};
use crate::transport::Transport;

/// One line of driver input
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DriverCommand {
    /// Deliver a host message (`{action, data, cbId?}`)
    Host { message: Value },
    /// Click the menu entry with this 1-based id
    Click { id: usize },
    Search {
        #[serde(default)]
        text: String,
    },
    Key { key: String },
    /// Set a popup field; numbers and booleans are accepted as their text
    Input { name: String, value: Value },
    Submit,
    Cancel,
    /// Emit the active surface's markup
    Render,
}

/// Start a thread that reads driver commands from stdin.
///
/// Bounded at 100 so a fast producer is throttled rather than buffered
/// without limit. The thread exits at end of input or once the receiver is
/// dropped.
pub fn start_stdin_listener() -> async_channel::Receiver<DriverCommand> {
    use std::io::BufRead;

    let (tx, rx) = async_channel::bounded(100);

    std::thread::spawn(move || {
        debug!("Stdin listener started");
        let stdin = std::io::stdin();
        let reader = stdin.lock();

        for line in reader.lines() {
            match line {
                Ok(line) if !line.trim().is_empty() => match parse_command(&line) {
                    Ok(cmd) => {
                        if tx.send_blocking(cmd).is_err() {
                            debug!("Command channel closed, exiting");
                            break;
                        }
                    }
                    Err(e) => {
                        let (preview, raw_len) = log_preview(&line);
                        warn!(raw_preview = %preview, raw_len, error = %e, "Skipping malformed command");
                    }
                },
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "Error reading stdin");
                    break;
                }
            }
        }
        debug!("Stdin listener exiting");
    });

    rx
}

pub fn parse_command(line: &str) -> Result<DriverCommand> {
    Ok(serde_json::from_str(line)?)
}

/// Applies driver commands to a session
pub struct Driver<T: Transport> {
    session: UiSession<T>,
    /// Emit markup after every command, not only on `render`
    print_markup: bool,
}

impl<T: Transport> Driver<T> {
    pub fn new(session: UiSession<T>, print_markup: bool) -> Self {
        Driver {
            session,
            print_markup,
        }
    }

    pub fn session(&self) -> &UiSession<T> {
        &self.session
    }

    /// Apply one command. Returns the markup record to emit, if any.
    /// Failures are logged; the driver keeps going.
    pub fn apply(&mut self, command: DriverCommand) -> Option<Value> {
        let render = matches!(command, DriverCommand::Render) || self.print_markup;

        if let Err(e) = self.dispatch(command) {
            match e.severity() {
                ErrorSeverity::Info => info!(error = %e, "{}", e.user_message()),
                _ => warn!(error = %e, "{}", e.user_message()),
            }
        }

        render.then(|| {
            json!({
                "type": "markup",
                "surface": self.session.surface().as_str(),
                "html": self.session.markup(),
            })
        })
    }

    fn dispatch(&mut self, command: DriverCommand) -> Result<()> {
        match command {
            DriverCommand::Host { message } => match classify_message(message) {
                ParseResult::Ok(msg) => self.session.handle_message(msg),
                ParseResult::UnknownAction { action, raw } => {
                    debug!(action = %action, raw = %raw, "Ignoring unknown host action");
                    Ok(())
                }
                ParseResult::MissingAction { raw } => {
                    warn!(raw = %raw, "Host message without action");
                    Ok(())
                }
                ParseResult::InvalidPayload { action, error, raw } => {
                    warn!(action = %action, error = %error, raw = %raw, "Invalid host message payload");
                    Ok(())
                }
            },
            DriverCommand::Click { id } => match id.checked_sub(1) {
                Some(index) => self.session.handle_event(UiEvent::Click { index }),
                None => {
                    warn!("Click ids start at 1");
                    Ok(())
                }
            },
            DriverCommand::Search { text } => self.session.handle_event(UiEvent::Search { text }),
            DriverCommand::Key { key } => self.session.handle_event(UiEvent::Key { key }),
            DriverCommand::Input { name, value } => {
                let value = match value {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                self.session.handle_event(UiEvent::FieldInput { name, value })
            }
            DriverCommand::Submit => self.session.handle_event(UiEvent::Submit),
            DriverCommand::Cancel => self.session.handle_event(UiEvent::Cancel),
            DriverCommand::Render => Ok(()),
        }
    }

    /// Drain `commands` until the sender side goes away
    pub fn run(&mut self, commands: async_channel::Receiver<DriverCommand>) {
        while let Ok(command) = commands.recv_blocking() {
            if let Some(record) = self.apply(command) {
                let mut stdout = std::io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", record).and_then(|_| stdout.flush()) {
                    warn!(error = %e, "Failed to write markup");
                }
            }
        }
        info!(surface = self.session.surface().as_str(), "Input closed, driver stopping");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::protocol::Callback;
    use crate::session::Surface;
    use crate::transport::RecordingTransport;

    fn driver(print_markup: bool) -> (Driver<RecordingTransport>, RecordingTransport) {
        let transport = RecordingTransport::new();
        let session = UiSession::new(Config::default(), transport.clone());
        (Driver::new(session, print_markup), transport)
    }

    fn cmd(line: &str) -> DriverCommand {
        parse_command(line).unwrap()
    }

    #[test]
    fn test_command_deserialization() {
        assert_eq!(cmd(r#"{"type": "click", "id": 2}"#), DriverCommand::Click { id: 2 });
        assert_eq!(cmd(r#"{"type": "submit"}"#), DriverCommand::Submit);
        assert_eq!(
            cmd(r#"{"type": "search"}"#),
            DriverCommand::Search { text: String::new() }
        );
        match cmd(r#"{"type": "host", "message": {"action": "CLOSE_MENU"}}"#) {
            DriverCommand::Host { message } => assert_eq!(message["action"], "CLOSE_MENU"),
            other => panic!("Expected Host command, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_command_is_an_error() {
        assert!(parse_command(r#"{"type": "explode"}"#).is_err());
        assert!(parse_command("not json").is_err());
    }

    #[test]
    fn test_menu_round() {
        let (mut d, posts) = driver(false);
        d.apply(cmd(r#"{"type":"host","message":{"action":"OPEN_MENU","data":[{"header":"A"},{"header":"B"}]}}"#));
        assert!(d.apply(cmd(r#"{"type":"click","id":2}"#)).is_none());
        assert_eq!(posts.take(), vec![Callback::ClickedButton { id: 2 }]);
        assert_eq!(d.session().surface(), Surface::Closed);
    }

    #[test]
    fn test_click_id_zero_is_ignored() {
        let (mut d, posts) = driver(false);
        d.apply(cmd(r#"{"type":"host","message":{"action":"OPEN_MENU","data":[{"header":"A"}]}}"#));
        d.apply(cmd(r#"{"type":"click","id":0}"#));
        assert!(posts.is_empty());
        assert_eq!(d.session().surface(), Surface::MenuOpen);
    }

    #[test]
    fn test_numeric_input_value_is_text() {
        let (mut d, posts) = driver(false);
        d.apply(cmd(r#"{"type":"host","message":{"action":"SHOW_INPUT","cbId":1,"data":[{"type":"number","name":"qty"}]}}"#));
        d.apply(cmd(r#"{"type":"input","name":"qty","value":5}"#));
        d.apply(cmd(r#"{"type":"submit"}"#));
        assert_eq!(
            posts.take()[0].body(),
            Some(json!({"cbId": 1, "result": {"qty": "5"}}))
        );
    }

    #[test]
    fn test_render_emits_markup_record() {
        let (mut d, _posts) = driver(false);
        d.apply(cmd(r#"{"type":"host","message":{"action":"OPEN_MENU","data":[{"header":"Garage"}]}}"#));
        let record = d.apply(DriverCommand::Render).unwrap();
        assert_eq!(record["type"], "markup");
        assert_eq!(record["surface"], "menu");
        assert!(record["html"].as_str().unwrap().contains("Garage"));
    }

    #[test]
    fn test_print_markup_emits_after_every_command() {
        let (mut d, _posts) = driver(true);
        let record = d.apply(cmd(r#"{"type":"key","key":"Escape"}"#)).unwrap();
        assert_eq!(record["surface"], "closed");
        assert_eq!(record["html"], "");
    }

    #[test]
    fn test_unknown_host_action_is_ignored() {
        let (mut d, posts) = driver(false);
        d.apply(cmd(r#"{"type":"host","message":{"action":"SHOW_TOAST","data":"hi"}}"#));
        assert!(posts.is_empty());
        assert_eq!(d.session().surface(), Surface::Closed);
    }
}
