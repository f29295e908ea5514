use folio::{DocumentConfig, FontKey, FontMetrics, FontStyleBits, InMemoryFontProvider, Margins, Unit};
use std::sync::Arc;

/// Points, 10pt margins, 10pt Helvetica: line height 12.5pt.
pub fn pt_config() -> DocumentConfig {
    DocumentConfig {
        unit: Unit::Pt,
        margins: Margins::all(10.0),
        font_size: 10.0,
        ..Default::default()
    }
}

pub fn disk_config() -> DocumentConfig {
    DocumentConfig {
        disk_cache: true,
        ..pt_config()
    }
}

pub fn rtl_config() -> DocumentConfig {
    DocumentConfig {
        rtl: true,
        ..pt_config()
    }
}

pub const NASKH: &str = "naskh";

/// A unicode font covering ASCII, the basic Arabic letters used in the
/// tests and their presentation forms. Every glyph is 500 units wide.
pub fn naskh_provider() -> Arc<InMemoryFontProvider> {
    let mut codes: Vec<u32> = (0x20..=0x7E).collect();
    codes.extend(0x0621..=0x064A);
    codes.extend(0xFE80..=0xFEFC);
    codes.extend([0xFB8E, 0xFB8F, 0xFB90, 0xFB91, 0xFBFC, 0xFBFD, 0xFBFE, 0xFBFF]);
    codes.extend([0x06A9, 0x06CC, 0x200C]);
    let metrics = FontMetrics::new("TestNaskh", 900.0, -300.0, 500)
        .unicode(true)
        .with_widths(codes.into_iter().map(|cp| (cp, 500)));

    let provider = InMemoryFontProvider::new();
    for style in [FontStyleBits::REGULAR, FontStyleBits::bold()] {
        if let Err(e) = provider.add(FontKey::new(NASKH, style), metrics.clone()) {
            panic!("cannot register test font: {e}");
        }
    }
    Arc::new(provider)
}

/// Like [`naskh_provider`], but base Arabic letters and their presentation
/// forms have different advances, in 1/1000 em.
pub fn uneven_naskh_provider(base: u16, forms: u16) -> Arc<InMemoryFontProvider> {
    let widths = (0x20..=0x7E)
        .map(|cp| (cp, 500))
        .chain((0x0621..=0x064A).map(|cp| (cp, base)))
        .chain((0xFE80..=0xFEFC).map(|cp| (cp, forms)));
    let metrics = FontMetrics::new("TestNaskhUneven", 900.0, -300.0, 500)
        .unicode(true)
        .with_widths(widths);

    let provider = InMemoryFontProvider::new();
    if let Err(e) = provider.add(FontKey::new(NASKH, FontStyleBits::REGULAR), metrics) {
        panic!("cannot register test font: {e}");
    }
    Arc::new(provider)
}

pub fn naskh_config() -> DocumentConfig {
    DocumentConfig {
        font_family: NASKH.to_string(),
        ..pt_config()
    }
}

pub const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";
