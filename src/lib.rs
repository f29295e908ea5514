//! # folio
//!
//! Bidirectional text layout and transactional page content for PDF
//! generation.
//!
//! The workspace is split the usual way:
//! - **folio-types** / **folio-style**: geometry, colours and the style vocabulary
//! - **folio-traits**: font metrics and byte store interfaces
//! - **folio-bidi**: Arabic/Persian shaping and bidirectional reordering
//! - **folio-layout**: font metrics and line breaking
//! - **folio-core**: pages, text layout, transactions, HTML handlers
//! - **folio-resource**: the disk-backed byte store
//!
//! This crate re-exports the pieces most callers need and adds the
//! platform-specific parts (font files, disk cache) behind the `native`
//! feature.
//!
//! ```
//! use folio::{CellAdvance, CellBorder, CoreFontProvider, Document, DocumentConfig, TextAlign};
//! use std::sync::Arc;
//!
//! let config = DocumentConfig { rtl: true, ..Default::default() };
//! let mut doc = Document::new(config, Arc::new(CoreFontProvider::new()))?;
//! doc.add_page();
//! doc.cell(0.0, 0.0, "\u{0633}\u{0644}\u{0627}\u{0645}", CellBorder::NONE, CellAdvance::NextLine, TextAlign::Left, false)?;
//! let pages = doc.pages()?;
//! assert!(!pages[0].content.is_empty());
//! # Ok::<(), folio::DocumentError>(())
//! ```

pub use folio_bidi as bidi;
pub use folio_core as core;
pub use folio_layout as layout;
pub use folio_style as style;
pub use folio_traits as traits;
pub use folio_types as types;

#[cfg(feature = "native")]
pub mod fonts;

pub use folio_bidi::{ParagraphDirection, ShapedGlyph, VisualRun, reorder, reorder_glyphs, reorder_str};
pub use folio_core::{
    CellAdvance, Cursor, Document, DocumentConfig, DocumentError, FontResource, LayoutCommand,
    PageOutput, Result, StyledNode, TagKind,
};
pub use folio_layout::CoreFontProvider;
pub use folio_style::{CellBorder, FontStyleBits, LineStyle, Margins, TextAlign, TextDirection, Unit};
pub use folio_traits::{ByteStore, FontKey, FontMetrics, FontMetricsProvider, InMemoryFontProvider, MemoryStore};
pub use folio_types::Color;

#[cfg(feature = "native")]
pub use folio_resource::DiskStore;
