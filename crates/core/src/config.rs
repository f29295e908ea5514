//! Document configuration.

use crate::error::{DocumentError, Result};
use folio_style::{FontStyleBits, Margins, Orientation, PageSize, Unit};
use serde::{Deserialize, Serialize};

/// Settings a document starts with. Lengths are in `unit`, the font size
/// in points.
///
/// ```
/// use folio_core::DocumentConfig;
///
/// let config = DocumentConfig::from_json(r#"{"unit": "pt", "margins": 36, "rtl": true}"#).unwrap();
/// assert_eq!(config.margins.left, 36.0);
/// assert!(config.rtl);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct DocumentConfig {
    pub unit: Unit,
    pub page_size: PageSize,
    pub orientation: Orientation,
    /// `bottom` doubles as the automatic page-break margin.
    pub margins: Margins,
    pub auto_page_break: bool,
    /// Horizontal padding inside cells.
    pub cell_padding: f32,
    /// Line height as a multiple of the font size.
    pub cell_height_ratio: f32,
    pub font_family: String,
    /// Style flags, e.g. `"B"` or `"BI"`.
    pub font_style: String,
    pub font_size: f32,
    pub rtl: bool,
    /// Keep page content in a temporary file instead of memory.
    pub disk_cache: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            unit: Unit::Mm,
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margins: Margins {
                top: 27.0,
                right: 15.0,
                bottom: 25.0,
                left: 15.0,
            },
            auto_page_break: true,
            cell_padding: 1.0,
            cell_height_ratio: 1.25,
            font_family: "helvetica".to_string(),
            font_style: String::new(),
            font_size: 12.0,
            rtl: false,
            disk_cache: false,
        }
    }
}

impl DocumentConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DocumentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn font_style_bits(&self) -> Result<FontStyleBits> {
        Ok(self.font_style.parse()?)
    }

    /// Page width and height in points.
    pub fn page_size_pt(&self) -> (f32, f32) {
        self.page_size.oriented_pt(self.orientation)
    }

    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.page_size_pt();
        if width <= 0.0 || height <= 0.0 {
            return Err(DocumentError::InvalidInput(format!(
                "page size must be positive, got {width}x{height}pt"
            )));
        }
        let m = &self.margins;
        if [m.top, m.right, m.bottom, m.left].iter().any(|v| *v < 0.0) {
            return Err(DocumentError::InvalidInput(
                "margins must not be negative".to_string(),
            ));
        }
        if self.cell_height_ratio <= 0.0 {
            return Err(DocumentError::InvalidInput(format!(
                "cell height ratio must be positive, got {}",
                self.cell_height_ratio
            )));
        }
        if self.font_size <= 0.0 {
            return Err(DocumentError::InvalidInput(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        self.font_style_bits()?;
        Ok(())
    }
}
