//! Metrics of the built-in core fonts.
//!
//! Core fonts are never embedded, so the layout engine only needs their
//! advance widths (1/1000 em, WinAnsi range) and vertical metrics.

use folio_traits::{FontError, FontKey, FontMetrics, FontMetricsProvider};
use std::collections::HashMap;
use std::sync::Arc;

const HELVETICA_ASCENT: f32 = 718.0;
const HELVETICA_DESCENT: f32 = -207.0;
const COURIER_ASCENT: f32 = 629.0;
const COURIER_DESCENT: f32 = -157.0;

/// Helvetica advances for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advances for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn ascii_widths(table: &[u16; 95]) -> impl Iterator<Item = (u32, u16)> + '_ {
    table
        .iter()
        .enumerate()
        .map(|(i, &w)| (0x20 + i as u32, w))
}

fn helvetica(bold: bool, italic: bool) -> FontMetrics {
    let (table, name) = match (bold, italic) {
        (false, false) => (&HELVETICA_WIDTHS, "Helvetica"),
        (true, false) => (&HELVETICA_BOLD_WIDTHS, "Helvetica-Bold"),
        (false, true) => (&HELVETICA_WIDTHS, "Helvetica-Oblique"),
        (true, true) => (&HELVETICA_BOLD_WIDTHS, "Helvetica-BoldOblique"),
    };
    FontMetrics::new(name, HELVETICA_ASCENT, HELVETICA_DESCENT, 556)
        .with_widths(ascii_widths(table))
        // no-break space
        .with_widths([(0xA0, 278)])
}

fn courier(bold: bool, italic: bool) -> FontMetrics {
    let name = match (bold, italic) {
        (false, false) => "Courier",
        (true, false) => "Courier-Bold",
        (false, true) => "Courier-Oblique",
        (true, true) => "Courier-BoldOblique",
    };
    FontMetrics::new(name, COURIER_ASCENT, COURIER_DESCENT, 600)
        .with_widths((0x20..=0x7E).map(|cp| (cp, 600)))
}

/// Provider for the standard Helvetica and Courier families.
///
/// `arial` is accepted as an alias of `helvetica`. Every face is built once
/// at construction and shared afterwards.
#[derive(Debug)]
pub struct CoreFontProvider {
    faces: HashMap<(String, bool, bool), Arc<FontMetrics>>,
}

impl CoreFontProvider {
    pub fn new() -> Self {
        let mut faces = HashMap::new();
        for bold in [false, true] {
            for italic in [false, true] {
                let sans = Arc::new(helvetica(bold, italic));
                faces.insert(("helvetica".to_string(), bold, italic), sans.clone());
                faces.insert(("arial".to_string(), bold, italic), sans);
                faces.insert(
                    ("courier".to_string(), bold, italic),
                    Arc::new(courier(bold, italic)),
                );
            }
        }
        Self { faces }
    }
}

impl Default for CoreFontProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FontMetricsProvider for CoreFontProvider {
    fn metrics(&self, key: &FontKey) -> Result<Arc<FontMetrics>, FontError> {
        self.faces
            .get(&(key.family.as_str().to_string(), key.style.bold, key.style.italic))
            .cloned()
            .ok_or_else(|| FontError::NotFound(key.to_string()))
    }

    fn name(&self) -> &'static str {
        "CoreFontProvider"
    }
}
