//! FontMetricsProvider trait for abstracting font metric lookup.
//!
//! The layout engine only ever needs advance widths and vertical metrics;
//! font programs and embedding live elsewhere.

use folio_style::FontStyleBits;
use folio_types::FontFamily;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    #[error("Font not found: {0}")]
    NotFound(String),

    #[error("Invalid font data for '{name}': {message}")]
    InvalidData { name: String, message: String },

    #[error("Font registry lock poisoned")]
    LockPoisoned,
}

/// Identifies a font face: a family plus the face-selecting style bits.
/// The size is not part of the key, it belongs to the active font.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontKey {
    pub family: FontFamily,
    pub style: FontStyleBits,
}

impl FontKey {
    pub fn new(family: impl Into<FontFamily>, style: FontStyleBits) -> Self {
        Self {
            family: family.into(),
            style: style.face(),
        }
    }
}

impl fmt::Display for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.family, self.style.face_suffix())
    }
}

/// Metric tables of one font face. All lengths are in 1/1000 em.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    pub name: String,
    pub ascent: f32,
    /// Negative for fonts that extend below the baseline.
    pub descent: f32,
    /// Advance used for code points missing from `widths`.
    pub default_width: u16,
    pub widths: HashMap<u32, u16>,
    /// Unicode fonts take two-byte code units in text strings; the others
    /// are single-byte (WinAnsi) fonts.
    pub unicode: bool,
}

impl FontMetrics {
    pub fn new(name: impl Into<String>, ascent: f32, descent: f32, default_width: u16) -> Self {
        Self {
            name: name.into(),
            ascent,
            descent,
            default_width,
            widths: HashMap::new(),
            unicode: false,
        }
    }

    pub fn unicode(mut self, unicode: bool) -> Self {
        self.unicode = unicode;
        self
    }

    pub fn with_widths(mut self, widths: impl IntoIterator<Item = (u32, u16)>) -> Self {
        self.widths.extend(widths);
        self
    }

    pub fn advance(&self, code_point: u32) -> u16 {
        self.widths
            .get(&code_point)
            .copied()
            .unwrap_or(self.default_width)
    }

    pub fn has_glyph(&self, code_point: u32) -> bool {
        self.widths.contains_key(&code_point)
    }
}

/// A source of font metrics.
///
/// # Implementations
///
/// - `InMemoryFontProvider`: metrics registered up front (always available)
/// - `CoreFontProvider` (layout crate): the built-in Helvetica family
pub trait FontMetricsProvider: Send + Sync + Debug {
    /// Look up the metrics of a face.
    fn metrics(&self, key: &FontKey) -> Result<Arc<FontMetrics>, FontError>;

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory metrics registry.
#[derive(Debug, Default)]
pub struct InMemoryFontProvider {
    fonts: RwLock<HashMap<FontKey, Arc<FontMetrics>>>,
}

impl InMemoryFontProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the metrics of a face.
    ///
    /// # Errors
    ///
    /// Returns `FontError::LockPoisoned` if the internal lock is poisoned.
    pub fn add(&self, key: FontKey, metrics: FontMetrics) -> Result<(), FontError> {
        let mut fonts = self.fonts.write().map_err(|_| FontError::LockPoisoned)?;
        fonts.insert(key, Arc::new(metrics));
        Ok(())
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.fonts.read().map(|f| f.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FontMetricsProvider for InMemoryFontProvider {
    fn metrics(&self, key: &FontKey) -> Result<Arc<FontMetrics>, FontError> {
        let fonts = self.fonts.read().map_err(|_| FontError::LockPoisoned)?;
        fonts
            .get(key)
            .cloned()
            .ok_or_else(|| FontError::NotFound(key.to_string()))
    }

    fn name(&self) -> &'static str {
        "InMemoryFontProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FontMetrics {
        FontMetrics::new("Sample", 800.0, -200.0, 500).with_widths([(65, 700), (32, 250)])
    }

    #[test]
    fn test_advance_falls_back_to_default() {
        let m = sample();
        assert_eq!(m.advance(65), 700);
        assert_eq!(m.advance(0x0628), 500);
        assert!(m.has_glyph(32));
        assert!(!m.has_glyph(0x0628));
    }

    #[test]
    fn test_key_ignores_decoration_bits() {
        let underlined: FontStyleBits = "BU".parse().unwrap();
        let key = FontKey::new("Sample", underlined);
        assert_eq!(key, FontKey::new("sample", FontStyleBits::bold()));
        assert_eq!(key.to_string(), "sampleB");
    }

    #[test]
    fn test_in_memory_provider_add_and_lookup() {
        let provider = InMemoryFontProvider::new();
        assert!(provider.is_empty());
        provider
            .add(FontKey::new("Sample", FontStyleBits::REGULAR), sample())
            .unwrap();
        let m = provider
            .metrics(&FontKey::new("SAMPLE", FontStyleBits::REGULAR))
            .unwrap();
        assert_eq!(m.name, "Sample");
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_in_memory_provider_not_found() {
        let provider = InMemoryFontProvider::new();
        let result = provider.metrics(&FontKey::new("missing", FontStyleBits::bold()));
        assert!(matches!(result, Err(FontError::NotFound(name)) if name == "missingB"));
        assert_eq!(provider.name(), "InMemoryFontProvider");
    }
}
