//! Font metric sources for the layout engine.
//!
//! - [`CoreFontProvider`]: built-in Helvetica and Courier families
//! - [`metrics_from_truetype`]: metrics read from a font program, to be
//!   registered with an `InMemoryFontProvider`

mod builtin;
mod truetype;

pub use self::builtin::CoreFontProvider;
pub use self::truetype::metrics_from_truetype;
