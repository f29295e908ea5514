//! Storage backends for the folio layout engine.
//!
//! This crate provides the file-backed implementation of the `ByteStore`
//! trait from folio-traits.
//!
//! ## Available Stores
//!
//! - [`DiskStore`]: page content spilled to an anonymous temporary file
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory store from folio-traits:
//! - [`MemoryStore`]: heap-backed storage

mod disk;

pub use disk::DiskStore;

pub use folio_traits::MemoryStore;
