//! nui-menu - overlay list menu and input popup for a host game client
//!
//! The host sends JSON messages (`OPEN_MENU`, `SHOW_HEADER`, `CLOSE_MENU`,
//! `SHOW_INPUT`); the overlay renders markup for the active surface and
//! reports user actions back as `POST <base>/<endpoint>` callbacks.

pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod input_form;
pub mod logging;
pub mod menu;
pub mod protocol;
pub mod render;
pub mod session;
pub mod transport;

pub use error::{NuiError, Result};
pub use session::{Surface, UiEvent, UiSession};
