//! Font metrics, text measurement and line breaking.
//!
//! Everything here works on logical-order text; bidirectional reordering
//! happens per line after wrapping.

use folio_traits::FontError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Font error: {0}")]
    Font(#[from] FontError),
    #[error("Generic layout error: {0}")]
    Generic(String),
}

pub mod fonts;
pub mod text;

pub use self::fonts::{CoreFontProvider, metrics_from_truetype};
pub use self::text::{
    ActiveFont, Line, break_lines, count_lines, is_breaking_space, measure_codes, measure_width,
    string_height, wrap, wrap_advances,
};
