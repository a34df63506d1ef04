//! HTML escaping helpers

/// Escape text content
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape a double-quoted attribute value
pub fn escape_attr(s: &str) -> String {
    escape_html(s).replace('\'', "&#39;")
}

/// Format a number the way an input's value attribute shows it:
/// integral values without a fraction, others with the shortest round-trip form
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    n.to_string()
}
