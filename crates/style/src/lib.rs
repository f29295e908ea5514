pub mod border;
pub mod dimension;
pub mod font;
pub mod resolved;
pub mod text;

pub use border::{CellBorder, DashPattern, LineCap, LineJoin, LineStyle};
pub use dimension::{Margins, Orientation, PageSize, Unit};
pub use font::{FontStyle, FontStyleBits, FontWeight};
pub use resolved::ResolvedStyle;
pub use text::{TextAlign, TextDecoration, TextDirection};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Unknown font style flag '{0}' (expected any of B, I, U, D)")]
    FontStyleFlag(char),
    #[error("Unknown border side '{0}' (expected any of L, T, R, B or 1)")]
    BorderSide(char),
    #[error("Invalid value: {0}")]
    Invalid(String),
}
