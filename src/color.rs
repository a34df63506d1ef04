//! Color picker values.
//!
//! A color input carries `#rrggbb`. The popup shows it as uppercase hex plus
//! an `RGB(r, g, b)` triple, and submits both.

use serde::Serialize;

use crate::error::{NuiError, Result};

/// Value a color input starts with when no default is given
pub const DEFAULT_COLOR: &str = "#000000";

/// Submitted color: uppercase hex and its RGB triple
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColorValue {
    pub hex: String,
    pub rgb: String,
}

impl ColorValue {
    pub fn from_hex(hex: &str) -> Result<Self> {
        let (r, g, b) = hex_to_rgb(hex)?;
        Ok(ColorValue {
            hex: hex.trim().to_uppercase(),
            rgb: format_rgb(r, g, b),
        })
    }

    /// Readout text shown next to the picker, e.g. `#FF0000 (RGB(255, 0, 0))`
    pub fn preview(&self) -> String {
        format!("{} ({})", self.hex, self.rgb)
    }
}

/// Decompose `#rrggbb` into its 8-bit channels
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8)> {
    let digits = hex
        .trim()
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| NuiError::InvalidColor(hex.to_string()))?;
    let packed =
        u32::from_str_radix(digits, 16).map_err(|_| NuiError::InvalidColor(hex.to_string()))?;

    let r = ((packed >> 16) & 0xff) as u8;
    let g = ((packed >> 8) & 0xff) as u8;
    let b = (packed & 0xff) as u8;
    Ok((r, g, b))
}

pub fn format_rgb(r: u8, g: u8, b: u8) -> String {
    format!("RGB({}, {}, {})", r, g, b)
}

/// Normalize a picker value the way a color input stores it (lowercase)
pub fn normalize_hex(hex: &str) -> Result<String> {
    hex_to_rgb(hex)?;
    Ok(hex.trim().to_lowercase())
}
