//! UI session
//!
//! The single owner of overlay state. Exactly one surface is active at a
//! time; host messages and user events are applied here, and every
//! callback the host receives goes out through the session's transport.

use std::collections::VecDeque;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{BusyPolicy, Config};
use crate::error::{NuiError, Result, ResultExt};
use crate::input_form::InputForm;
use crate::logging;
use crate::menu::MenuController;
use crate::protocol::{Callback, HostMessage, MenuItem, SurfaceKind};
use crate::render::RenderOptions;
use crate::transport::Transport;

/// Which surface currently owns the overlay
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Surface {
    #[default]
    Closed,
    MenuOpen,
    PopupOpen,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Closed => "closed",
            Surface::MenuOpen => "menu",
            Surface::PopupOpen => "popup",
        }
    }

    fn kind(&self) -> Option<SurfaceKind> {
        match self {
            Surface::Closed => None,
            Surface::MenuOpen => Some(SurfaceKind::Menu),
            Surface::PopupOpen => Some(SurfaceKind::Popup),
        }
    }
}

/// User interaction with the active surface
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// Click on the menu entry rendered for original index `index`
    Click { index: usize },
    /// New contents of the search box
    Search { text: String },
    Key { key: String },
    /// New value typed, picked or dragged into a popup field
    FieldInput { name: String, value: String },
    Submit,
    Cancel,
}

pub struct UiSession<T: Transport> {
    config: Config,
    transport: T,
    surface: Surface,
    menu: MenuController,
    form: InputForm,
    /// Opens held back while the other surface was active
    pending: VecDeque<HostMessage>,
}

impl<T: Transport> UiSession<T> {
    pub fn new(config: Config, transport: T) -> Self {
        let options = RenderOptions::from_config(&config);
        UiSession {
            config,
            transport,
            surface: Surface::Closed,
            menu: MenuController::new(options),
            form: InputForm::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn menu(&self) -> &MenuController {
        &self.menu
    }

    pub fn form(&self) -> &InputForm {
        &self.form
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Markup of the active surface; empty when closed
    pub fn markup(&self) -> &str {
        match self.surface {
            Surface::Closed => "",
            Surface::MenuOpen => self.menu.markup(),
            Surface::PopupOpen => self.form.markup(),
        }
    }

    /// Host params of the open menu's item `id`
    pub fn params(&self, id: usize) -> Option<&Value> {
        self.menu.params(id)
    }

    /// Apply one host message.
    ///
    /// An open for the surface that is not active is queued or rejected per
    /// `busyPolicy`; a rejected SHOW_INPUT still answers its `cbId`.
    pub fn handle_message(&mut self, message: HostMessage) -> Result<()> {
        debug!(action = message.action(), surface = self.surface.as_str(), "Host message");

        if let (Some(requested), Some(active)) = (message.opens(), self.surface.kind()) {
            if requested != active {
                return self.handle_busy(message, requested, active);
            }
        }
        self.dispatch(message)
    }

    /// Apply one user event to the active surface
    pub fn handle_event(&mut self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::Click { index } => {
                self.require(Surface::MenuOpen)?;
                if let Some(callback) = self.menu.click(index) {
                    self.transport.post(&callback);
                    self.set_surface(Surface::Closed);
                }
                Ok(())
            }
            UiEvent::Search { text } => {
                self.require(Surface::MenuOpen)?;
                self.menu.search(&text);
                Ok(())
            }
            UiEvent::Key { key } => {
                self.handle_key(&key);
                Ok(())
            }
            UiEvent::FieldInput { name, value } => {
                self.require(Surface::PopupOpen)?;
                self.form.set_field(&name, &value)
            }
            UiEvent::Submit => {
                self.require(Surface::PopupOpen)?;
                let callback = self.form.submit()?;
                self.transport.post(&callback);
                self.set_surface(Surface::Closed);
                Ok(())
            }
            UiEvent::Cancel => {
                self.require(Surface::PopupOpen)?;
                self.cancel_popup()
            }
        }
    }

    fn handle_key(&mut self, key: &str) {
        logging::log_key_event(key, self.surface.as_str());
        if !(key.eq_ignore_ascii_case("escape") || key.eq_ignore_ascii_case("esc")) {
            return;
        }
        match self.surface {
            Surface::MenuOpen => {
                if let Some(callback) = self.menu.cancel() {
                    self.transport.post(&callback);
                }
                self.set_surface(Surface::Closed);
            }
            Surface::PopupOpen => {
                self.cancel_popup().warn_on_err();
            }
            Surface::Closed => debug!("Escape ignored, nothing open"),
        }
    }

    fn cancel_popup(&mut self) -> Result<()> {
        let callback = self.form.cancel()?;
        self.transport.post(&callback);
        self.set_surface(Surface::Closed);
        Ok(())
    }

    fn require(&self, surface: Surface) -> Result<()> {
        if self.surface == surface {
            return Ok(());
        }
        Err(NuiError::NotOpen(match surface {
            Surface::PopupOpen => "popup",
            _ => "menu",
        }))
    }

    fn handle_busy(
        &mut self,
        message: HostMessage,
        requested: SurfaceKind,
        active: SurfaceKind,
    ) -> Result<()> {
        if self.config.busy_policy == BusyPolicy::Queue
            && self.pending.len() < self.config.max_pending_opens
        {
            info!(
                action = message.action(),
                active = active.as_str(),
                pending = self.pending.len() + 1,
                "Surface busy, open queued"
            );
            self.pending.push_back(message);
            return Ok(());
        }

        let err = NuiError::SurfaceBusy {
            requested: requested.as_str(),
            active: active.as_str(),
        };
        warn!(
            action = message.action(),
            policy = ?self.config.busy_policy,
            error = %err,
            "Open rejected"
        );
        if let HostMessage::ShowInput { cb_id, .. } = message {
            self.transport.post(&Callback::InputResult {
                cb_id,
                result: None,
                error: Some(err.to_string()),
            });
        }
        Err(err)
    }

    fn dispatch(&mut self, message: HostMessage) -> Result<()> {
        match message {
            HostMessage::OpenMenu { data } | HostMessage::ShowHeader { data } => {
                self.menu.open(MenuItem::list_from_value(&data));
                self.set_surface(Surface::MenuOpen);
                Ok(())
            }
            HostMessage::CloseMenu {} => {
                if self.surface == Surface::MenuOpen {
                    self.menu.close();
                    self.set_surface(Surface::Closed);
                } else {
                    let before = self.pending.len();
                    self.pending
                        .retain(|queued| queued.opens() != Some(SurfaceKind::Menu));
                    debug!(
                        dropped_pending = before - self.pending.len(),
                        "CLOSE_MENU with no menu open"
                    );
                }
                Ok(())
            }
            HostMessage::ShowInput { data, cb_id } => {
                if let Some(previous) = self.form.cb_id().filter(|_| self.form.is_shown()) {
                    warn!(cb_id = %previous, "Popup replaced before it was answered");
                }
                match self.form.open(&data, cb_id) {
                    Ok(()) => {
                        self.set_surface(Surface::PopupOpen);
                        Ok(())
                    }
                    Err(e) => {
                        if !matches!(e, NuiError::MalformedSchema(_)) {
                            let callback = self.form.failure(&e);
                            self.transport.post(&callback);
                        }
                        if self.surface == Surface::PopupOpen {
                            self.set_surface(Surface::Closed);
                        }
                        Err(e)
                    }
                }
            }
        }
    }

    fn set_surface(&mut self, surface: Surface) {
        if self.surface != surface {
            info!(
                event_type = "surface",
                from = self.surface.as_str(),
                to = surface.as_str(),
                "Surface changed"
            );
            self.surface = surface;
        }
        if surface == Surface::Closed {
            self.replay_pending();
        }
    }

    /// Replay queued opens until one of them takes the overlay
    fn replay_pending(&mut self) {
        while self.surface == Surface::Closed {
            let Some(message) = self.pending.pop_front() else {
                break;
            };
            debug!(action = message.action(), "Replaying queued open");
            self.dispatch(message).warn_on_err();
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
