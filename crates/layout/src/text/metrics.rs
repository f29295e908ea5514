//! Text measurement with the active font.

use crate::LayoutError;
use crate::text::wrapper::count_lines;
use folio_traits::{FontKey, FontMetrics, FontMetricsProvider};
use std::sync::Arc;

/// A font face at a size, with the horizontal adjustments applied to every
/// glyph. Lengths returned by its methods are in user units.
#[derive(Debug, Clone)]
pub struct ActiveFont {
    pub metrics: Arc<FontMetrics>,
    /// Size in points.
    pub size: f32,
    /// Horizontal scaling in percent.
    pub stretching: f32,
    /// Extra space after every character, in points.
    pub spacing: f32,
    /// Points per user unit.
    pub scale: f32,
}

impl ActiveFont {
    pub fn new(metrics: Arc<FontMetrics>, size: f32, scale: f32) -> Self {
        Self {
            metrics,
            size,
            stretching: 100.0,
            spacing: 0.0,
            scale,
        }
    }

    /// Looks the face up in `provider`.
    pub fn load(
        provider: &dyn FontMetricsProvider,
        key: &FontKey,
        size: f32,
        scale: f32,
    ) -> Result<Self, LayoutError> {
        let metrics = provider.metrics(key)?;
        Ok(Self::new(metrics, size, scale))
    }

    pub fn with_stretching(mut self, stretching: f32) -> Self {
        self.stretching = stretching;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Font size in user units.
    pub fn size_in_units(&self) -> f32 {
        self.size / self.scale
    }

    pub fn ascent(&self) -> f32 {
        self.metrics.ascent / 1000.0 * self.size_in_units()
    }

    /// Negative below the baseline.
    pub fn descent(&self) -> f32 {
        self.metrics.descent / 1000.0 * self.size_in_units()
    }

    pub fn char_width(&self, code_point: u32) -> f32 {
        let advance = f32::from(self.metrics.advance(code_point));
        (advance / 1000.0 * self.size * self.stretching / 100.0 + self.spacing) / self.scale
    }
}

/// Width of `text` in user units.
pub fn measure_width(text: &str, font: &ActiveFont) -> f32 {
    text.chars().map(|c| font.char_width(c as u32)).sum()
}

/// Width of a code point sequence in user units.
pub fn measure_codes(codes: &[u32], font: &ActiveFont) -> f32 {
    codes.iter().map(|&c| font.char_width(c)).sum()
}

/// Height of `text` wrapped to `max_width`: lines × font size × ratio.
pub fn string_height(max_width: f32, text: &str, font: &ActiveFont, line_height_ratio: f32) -> f32 {
    count_lines(text, font, max_width) as f32 * font.size_in_units() * line_height_ratio
}
