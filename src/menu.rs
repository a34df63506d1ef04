//! Menu Controller
//!
//! Owns the list menu lifecycle (Closed → Open → Closed), the search query
//! and click dispatch. The original item list is kept for the whole time the
//! menu is open; searching re-filters it from scratch and re-renders, so an
//! item's id is always its original index plus one.

use serde_json::Value;
use tracing::{debug, info};

use crate::logging;
use crate::protocol::{Callback, MenuItem};
use crate::render::{render_menu, RenderOptions};

#[derive(Debug, Default)]
pub struct MenuController {
    items: Vec<MenuItem>,
    /// Original indices matching the current query, in display order
    shown: Vec<usize>,
    query: String,
    open: bool,
    search_visible: bool,
    markup: String,
    options: RenderOptions,
}

impl MenuController {
    pub fn new(options: RenderOptions) -> Self {
        MenuController {
            options,
            ..MenuController::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn search_visible(&self) -> bool {
        self.search_visible
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Original indices currently listed (hidden items included; the
    /// renderer drops those)
    pub fn shown(&self) -> &[usize] {
        &self.shown
    }

    /// Open the menu with `items`, replacing any menu already open
    pub fn open(&mut self, items: Vec<MenuItem>) {
        self.items = items;
        self.query.clear();
        self.open = true;
        self.search_visible = true;
        self.refilter();

        info!(
            event_type = "ui_event",
            surface = "menu",
            item_count = self.items.len(),
            visible_count = self.items.iter().filter(|i| !i.hidden).count(),
            "Menu opened"
        );
    }

    /// Clear markup and per-item params and hide the search box.
    /// Closing a closed menu is a no-op.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.items.clear();
        self.shown.clear();
        self.query.clear();
        self.markup.clear();
        self.open = false;
        self.search_visible = false;
        logging::log_ui_event("menu", "closed", None);
    }

    /// Apply the search box contents
    pub fn search(&mut self, text: &str) {
        if !self.open {
            debug!(query = text, "Search ignored, menu closed");
            return;
        }
        self.query = text.to_string();
        self.refilter();
        debug!(
            query = %self.query,
            matches = self.shown.len(),
            "Menu filtered"
        );
    }

    /// Click on the entry rendered for original index `index`.
    ///
    /// Returns the callback to post and closes the menu; header, disabled,
    /// hidden, filtered-out and unknown entries are inert.
    pub fn click(&mut self, index: usize) -> Option<Callback> {
        if !self.open || !self.shown.contains(&index) {
            debug!(index, "Click ignored, entry not rendered");
            return None;
        }
        let item = self.items.get(index)?;
        if item.hidden || !item.is_clickable() {
            debug!(index, "Click ignored, entry not clickable");
            return None;
        }

        let id = index + 1;
        info!(event_type = "ui_event", surface = "menu", item_id = id, "Menu item clicked");
        self.close();
        Some(Callback::ClickedButton { id })
    }

    /// Escape while open: close and tell the host
    pub fn cancel(&mut self) -> Option<Callback> {
        if !self.open {
            return None;
        }
        self.close();
        Some(Callback::CloseMenu)
    }

    /// Host params stored for the 1-based item `id` while the menu is open
    pub fn params(&self, id: usize) -> Option<&Value> {
        self.items.get(id.checked_sub(1)?)?.params.as_ref()
    }

    fn refilter(&mut self) {
        let query = self.query.to_lowercase();
        self.shown = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| query.is_empty() || item.header_text().to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect();
        self.markup = render_menu(&self.items, &self.shown, &self.query, &self.options);
    }
}
