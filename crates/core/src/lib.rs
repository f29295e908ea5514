//! # folio-core
//!
//! Document layout core: page buffers, text layout with bidirectional
//! reordering, transactions and the HTML handler table.
//!
//! Content is written as PDF content-stream fragments to a [`ByteStore`]
//! kept in memory or in a temporary file (`disk-cache` feature). Object
//! serialization, font embedding and markup parsing are left to callers:
//! they receive per-page content streams from [`Document::pages`] and the
//! font usage from [`Document::font_resources`].
//!
//! ```
//! use folio_core::{CellAdvance, Document, DocumentConfig};
//! use folio_core::layout::CoreFontProvider;
//! use folio_core::style::{CellBorder, TextAlign};
//! use std::sync::Arc;
//!
//! let mut doc = Document::new(DocumentConfig::default(), Arc::new(CoreFontProvider::new()))?;
//! doc.add_page();
//! doc.cell(40.0, 0.0, "Total", CellBorder::ALL, CellAdvance::Right, TextAlign::Left, false)?;
//! doc.begin_transaction();
//! doc.write(0.0, "draft", TextAlign::Left)?;
//! doc.rollback_transaction()?;
//! assert_eq!(doc.pages()?.len(), 1);
//! # Ok::<(), folio_core::DocumentError>(())
//! ```
//!
//! [`ByteStore`]: folio_traits::ByteStore

pub use folio_bidi as bidi;
pub use folio_layout as layout;
pub use folio_style as style;
pub use folio_traits as traits;
pub use folio_types as types;

pub mod config;
pub mod document;
pub mod encoding;
pub mod error;
pub mod fonts;
pub mod graphics;
pub mod html;
pub mod page;
pub mod text;
mod transaction;

pub use config::DocumentConfig;
pub use document::{Cursor, Document};
pub use error::{DocumentError, Result};
pub use fonts::FontResource;
pub use html::{FontChange, LayoutCommand, StyledNode, TagHandler, TagKind};
pub use page::PageOutput;
pub use text::CellAdvance;
