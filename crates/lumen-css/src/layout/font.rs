//! Text measurement.

use crate::style::FontDescriptor;

/// Font metrics interface for text measurement during layout.
///
/// Implementors provide advance widths and vertical metrics for a font. The
/// layout engine calls these to measure words for line breaking and to
/// align boxes on a shared baseline.
pub trait FontMetrics {
    /// Measure the total advance width of `text` in `font`.
    fn text_width(&self, text: &str, font: &FontDescriptor) -> f32;

    /// Distance from the baseline to the top of the tallest glyph.
    fn ascent(&self, font: &FontDescriptor) -> f32;

    /// Distance from the baseline to the bottom of the lowest glyph.
    fn descent(&self, font: &FontDescriptor) -> f32;

    /// Height of a single box of text in `font`, leading included.
    fn line_height(&self, font: &FontDescriptor) -> f32;
}

/// Approximate font metrics using fixed ratios of the font size.
///
/// Without access to font data the average advance width of Latin glyphs in
/// a proportional font is taken as 0.6× the font size. Ascent and descent
/// split the em box 80/20 and the line height is 1.2×.
///
/// This is the default for headless rendering, and the metrics every test
/// uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl ApproximateFontMetrics {
    /// Advance width of one character, relative to the font size.
    pub const CHAR_WIDTH_RATIO: f32 = 0.6;
    /// Ascent relative to the font size.
    pub const ASCENT_RATIO: f32 = 0.8;
    /// Descent relative to the font size.
    pub const DESCENT_RATIO: f32 = 0.2;
    /// Line height relative to the font size.
    pub const LINE_HEIGHT_RATIO: f32 = 1.2;
}

impl FontMetrics for ApproximateFontMetrics {
    fn text_width(&self, text: &str, font: &FontDescriptor) -> f32 {
        text.chars().count() as f32 * font.size * Self::CHAR_WIDTH_RATIO
    }

    fn ascent(&self, font: &FontDescriptor) -> f32 {
        font.size * Self::ASCENT_RATIO
    }

    fn descent(&self, font: &FontDescriptor) -> f32 {
        font.size * Self::DESCENT_RATIO
    }

    fn line_height(&self, font: &FontDescriptor) -> f32 {
        font.size * Self::LINE_HEIGHT_RATIO
    }
}
