//! Font files from the local filesystem.

use folio_core::{DocumentError, Result};
use folio_layout::metrics_from_truetype;
use folio_style::FontStyleBits;
use folio_traits::{FontKey, InMemoryFontProvider};
use std::path::Path;

/// Reads a TrueType/OpenType file and registers its metrics as the
/// `style` face of `family`. Faces loaded this way are unicode fonts.
pub fn register_font_file(
    provider: &InMemoryFontProvider,
    family: &str,
    style: FontStyleBits,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| {
        DocumentError::InvalidInput(format!("cannot read font file {}: {e}", path.display()))
    })?;
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(family);
    let metrics = metrics_from_truetype(name, &data)?;
    let key = FontKey::new(family, style);
    log::debug!(
        "Loaded {} from {} ({} glyph widths)",
        key,
        path.display(),
        metrics.widths.len()
    );
    provider.add(key, metrics)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file() {
        let provider = InMemoryFontProvider::new();
        let dir = tempfile::tempdir().unwrap();
        let err = register_font_file(
            &provider,
            "sans",
            FontStyleBits::REGULAR,
            dir.path().join("missing.ttf"),
        )
        .unwrap_err();
        assert!(matches!(err, DocumentError::InvalidInput(msg) if msg.contains("missing.ttf")));
        assert!(provider.is_empty());
    }

    #[test]
    fn test_invalid_font_bytes() {
        let provider = InMemoryFontProvider::new();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();
        let err =
            register_font_file(&provider, "sans", FontStyleBits::REGULAR, file.path()).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidInput(_)));
        assert!(provider.is_empty());
    }
}
