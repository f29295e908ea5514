pub mod color;
pub mod geometry;
pub mod ids;

pub use color::Color;
pub use geometry::{Point, Rect};
pub use ids::{FontFamily, ResourceName};
