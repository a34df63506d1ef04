//! Markup rendering for the overlay surfaces
//!
//! - `menu`: search box plus one entry per visible menu item
//! - `form`: the input popup with one widget per field
//! - `html`: escaping helpers shared by both
//!
//! Rendering is pure: the controllers own state and call in here after every
//! change, replacing the previous markup wholesale.

mod form;
mod html;
mod menu;

pub use form::{render_hidden_popup, render_popup};
pub use html::{escape_attr, escape_html, format_number};
pub use menu::{render_entry, render_menu};

use crate::config::Config;

/// Knobs the renderer takes from configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub search_placeholder: String,
    /// Insert item header/text verbatim instead of escaping
    pub allow_item_markup: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions::from_config(&Config::default())
    }
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        RenderOptions {
            search_placeholder: config.search_placeholder.clone(),
            allow_item_markup: config.allow_item_markup,
        }
    }
}
