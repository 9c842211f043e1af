//! Resolved style values.
//!
//! The cascade stores every property as a plain string. Layout and painting
//! read them back through the helpers here, which fall back to fixed
//! defaults (12px `SansSerif`, black) when a value is missing or unusable.

use std::collections::BTreeMap;

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// Property name to value, as written in the stylesheet.
pub type StyleMap = BTreeMap<String, String>;

/// Font size used by layout when `font-size` cannot be read.
pub const FALLBACK_FONT_SIZE_PX: f32 = 12.0;

/// Font family used by layout when `font-family` is not set.
pub const FALLBACK_FONT_FAMILY: &str = "SansSerif";

/// Colour used when `color` is not set.
pub const FALLBACK_COLOR: &str = "black";

/// `font-weight` keywords the renderer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

impl FontWeight {
    /// Read a `font-weight` value. Numeric weights of 600 and above are bold;
    /// anything unrecognised is normal.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        if let Ok(weight) = value.parse::<Self>() {
            return weight;
        }
        match value.parse::<u16>() {
            Ok(numeric) if numeric >= 600 => Self::Bold,
            _ => Self::Normal,
        }
    }
}

/// `font-style` keywords the renderer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright glyphs.
    #[default]
    Normal,
    /// Slanted glyphs.
    Italic,
}

/// Everything a renderer needs to pick a font.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontDescriptor {
    /// Family name, passed through unchanged.
    pub family: String,
    /// Size in pixels.
    pub size: f32,
    /// Weight.
    pub weight: FontWeight,
    /// Style.
    pub style: FontStyle,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: FALLBACK_FONT_FAMILY.to_string(),
            size: FALLBACK_FONT_SIZE_PX,
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
        }
    }
}

impl FontDescriptor {
    /// Build the font for a node from its resolved style. A missing style
    /// gives the fallback font.
    #[must_use]
    pub fn from_style(style: Option<&StyleMap>) -> Self {
        let Some(style) = style else {
            return Self::default();
        };
        Self {
            family: style
                .get("font-family")
                .cloned()
                .unwrap_or_else(|| FALLBACK_FONT_FAMILY.to_string()),
            size: style
                .get("font-size")
                .and_then(|size| parse_px(size))
                .unwrap_or(FALLBACK_FONT_SIZE_PX),
            weight: style
                .get("font-weight")
                .map_or(FontWeight::Normal, |w| FontWeight::from_value(w)),
            style: style
                .get("font-style")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        }
    }
}

/// Parse a pixel length such as `16px`. A bare number is accepted as
/// pixels; negative, non-finite and other units are rejected.
#[must_use]
pub fn parse_px(value: &str) -> Option<f32> {
    let number = value.trim().strip_suffix("px").unwrap_or(value).trim();
    number
        .parse::<f32>()
        .ok()
        .filter(|px| px.is_finite() && *px >= 0.0)
}

/// The `color` of a node, or black.
#[must_use]
pub fn color_of(style: Option<&StyleMap>) -> String {
    style
        .and_then(|s| s.get("color"))
        .cloned()
        .unwrap_or_else(|| FALLBACK_COLOR.to_string())
}

/// The `background-color` of a node, unless absent or `transparent`.
#[must_use]
pub fn background_of(style: Option<&StyleMap>) -> Option<String> {
    style
        .and_then(|s| s.get("background-color"))
        .filter(|color| !color.eq_ignore_ascii_case("transparent"))
        .cloned()
}
