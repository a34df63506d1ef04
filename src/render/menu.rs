//! List menu markup

use std::fmt::Write;

use super::html::{escape_attr, escape_html, format_number};
use super::RenderOptions;
use crate::protocol::MenuItem;

/// Render the menu container: the search box followed by one entry per index
/// in `shown`, in the order given. Hidden items are skipped even if listed.
///
/// Entries carry their original index as element id, so click dispatch is
/// unaffected by hidden or filtered-out neighbours.
pub fn render_menu(
    items: &[MenuItem],
    shown: &[usize],
    query: &str,
    options: &RenderOptions,
) -> String {
    let mut html = String::from("<div id='buttons'>");

    let _ = write!(
        html,
        r#"<div class="title search-container"><input type="text" id="search-input" placeholder="{}" autocomplete="off" value="{}"></div>"#,
        escape_attr(&options.search_placeholder),
        escape_attr(query),
    );

    for &index in shown {
        match items.get(index) {
            Some(item) if !item.hidden => html.push_str(&render_entry(index, item, options)),
            _ => {}
        }
    }

    html.push_str("</div>");
    html
}

/// Render one entry plus its progress bar
pub fn render_entry(index: usize, item: &MenuItem, options: &RenderOptions) -> String {
    let text = |s: &str| {
        if options.allow_item_markup {
            s.to_string()
        } else {
            escape_html(s)
        }
    };

    let mut classes = String::from(if item.is_menu_header { "title" } else { "button" });
    if item.disabled {
        classes.push_str(" disabled");
    }

    let mut html = String::new();
    let _ = write!(html, r#"<div class="{}" id="{}">"#, classes, index);

    if let Some(icon) = item.icon.as_deref().filter(|i| !i.is_empty()) {
        let icon = escape_attr(icon);
        // image first; if it fails to load it removes itself and the glyph shows
        let _ = write!(
            html,
            r#"<div class="icon"><img src="{icon}" onerror="this.onerror=null; this.remove();"><i class="{icon}"></i></div>"#
        );
    }

    html.push_str(r#"<div class="column">"#);
    let header = match item.header.as_deref() {
        Some(h) if !h.is_empty() => text(h),
        _ => "&nbsp;".to_string(),
    };
    let _ = write!(html, r#"<div class="header">{}</div>"#, header);
    if let Some(message) = item.text.as_deref().filter(|t| !t.is_empty()) {
        let _ = write!(html, r#"<div class="text">{}</div>"#, text(message));
    }
    html.push_str("</div></div>");

    if let Some(progress) = item.progress.filter(|p| *p > 0.0) {
        let width = format_number(progress.clamp(0.0, 100.0));
        let style = match item.color_scheme.as_deref().filter(|c| !c.is_empty()) {
            Some(colour) => format!("width: {}%; background-color: {};", width, escape_attr(colour)),
            None => format!("width: {}%;", width),
        };
        let _ = write!(
            html,
            r#"<div class="progress-container"><div class="progress-bar" style="{}"></div></div>"#,
            style
        );
    }

    html
}
