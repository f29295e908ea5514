//! Metrics extraction from TrueType/OpenType font programs.

use folio_traits::{FontError, FontMetrics};
use ttf_parser::{Face, GlyphId};

/// Reads advance widths and vertical metrics from a font program.
///
/// Widths are rescaled to 1000 units per em. Every code point mapped by a
/// Unicode cmap subtable gets an entry; the `.notdef` advance becomes the
/// default width. The resulting metrics describe a two-byte (unicode) font.
pub fn metrics_from_truetype(name: &str, data: &[u8]) -> Result<FontMetrics, FontError> {
    let face = Face::parse(data, 0).map_err(|e| FontError::InvalidData {
        name: name.to_string(),
        message: e.to_string(),
    })?;

    let units_per_em = face.units_per_em();
    if units_per_em == 0 {
        return Err(FontError::InvalidData {
            name: name.to_string(),
            message: "units per em is zero".to_string(),
        });
    }
    let scale = 1000.0 / f32::from(units_per_em);
    let to_thousandths = |advance: u16| (f32::from(advance) * scale).round() as u16;

    let default_width = face
        .glyph_hor_advance(GlyphId(0))
        .map(to_thousandths)
        .unwrap_or(500);

    let mut widths = Vec::new();
    if let Some(cmap) = face.tables().cmap {
        for subtable in cmap.subtables {
            if !subtable.is_unicode() {
                continue;
            }
            subtable.codepoints(|code_point| {
                if let Some(advance) = subtable
                    .glyph_index(code_point)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                {
                    widths.push((code_point, to_thousandths(advance)));
                }
            });
        }
    }

    log::debug!(
        "Loaded metrics for '{}': {} mapped code points, {} units per em",
        name,
        widths.len(),
        units_per_em
    );

    Ok(FontMetrics::new(
        name,
        f32::from(face.ascender()) * scale,
        f32::from(face.descender()) * scale,
        default_width,
    )
    .with_widths(widths)
    .unicode(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_font_data() {
        let err = metrics_from_truetype("broken", b"definitely not a font").unwrap_err();
        match err {
            FontError::InvalidData { name, .. } => assert_eq!(name, "broken"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_empty_data() {
        assert!(metrics_from_truetype("empty", &[]).is_err());
    }
}
