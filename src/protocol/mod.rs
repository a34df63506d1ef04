//! Host protocol for the overlay
//!
//! Defines the messages exchanged between the host application and the UI.
//!
//! # Message Categories
//!
//! ## Inbound (host → UI), discriminated by `action`
//! - `OPEN_MENU` / `SHOW_HEADER`: open or re-render the list menu
//! - `CLOSE_MENU`: close the list menu
//! - `SHOW_INPUT`: open the input popup, `cbId` correlates the result
//!
//! ## Outbound (UI → host), POST to `<base>/<endpoint>`
//! - `clickedButton`: 1-based item id
//! - `closeMenu`: no body
//! - `inputResult`: `{cbId, result}`
//!
//! # Module Structure
//!
//! - `types`: payload types (MenuItem, FieldSchema, FormValue)
//! - `message`: HostMessage and Callback
//! - `io`: graceful parsing of inbound JSON

mod io;
mod message;
mod types;

pub use io::*;
pub use message::*;
pub use types::*;
