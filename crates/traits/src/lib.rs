pub mod font;
pub mod store;

pub use font::{FontError, FontKey, FontMetrics, FontMetricsProvider, InMemoryFontProvider};
pub use store::{ByteStore, MemoryStore, StoreError, check_range};
