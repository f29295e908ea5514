pub mod metrics;
pub mod wrapper;

pub use self::metrics::{ActiveFont, measure_codes, measure_width, string_height};
pub use self::wrapper::{Line, break_lines, count_lines, is_breaking_space, wrap, wrap_advances};
