//! ByteStore trait: the growable byte sink page content lives in.
//!
//! Page buffers never own their bytes directly. They record extents into a
//! single append-only store, which can be memory- or file-backed. Because the
//! store only ever grows between checkpoints, a checkpoint is just its length.

use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Range {offset}+{len} is outside a store of {size} bytes")]
    OutOfBounds { offset: u64, len: u64, size: u64 },

    #[error("Cannot truncate a store of {size} bytes to {requested} bytes")]
    TruncateBeyondEnd { requested: u64, size: u64 },
}

/// An append-only byte store that can be cut back to an earlier length.
pub trait ByteStore: Send + Debug {
    /// Current length in bytes; also the offset of the next append.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `bytes` and returns the new length.
    fn append(&mut self, bytes: &[u8]) -> Result<u64, StoreError>;

    /// Cuts the store back to `len` bytes. Growing is an error.
    fn truncate(&mut self, len: u64) -> Result<(), StoreError>;

    fn read_range(&self, offset: u64, len: u64) -> Result<Vec<u8>, StoreError>;

    /// A new, independent store of the same kind holding the first `len`
    /// bytes of this one.
    fn fork(&self, len: u64) -> Result<Box<dyn ByteStore>, StoreError>;

    /// Returns a human-readable name for this store (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Validates that `offset..offset + len` lies inside a store of `size` bytes.
pub fn check_range(offset: u64, len: u64, size: u64) -> Result<(), StoreError> {
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(()),
        _ => Err(StoreError::OutOfBounds { offset, len, size }),
    }
}

/// A heap-backed store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    bytes: Vec<u8>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl ByteStore for MemoryStore {
    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn append(&mut self, bytes: &[u8]) -> Result<u64, StoreError> {
        self.bytes.extend_from_slice(bytes);
        Ok(self.len())
    }

    fn truncate(&mut self, len: u64) -> Result<(), StoreError> {
        if len > self.len() {
            return Err(StoreError::TruncateBeyondEnd {
                requested: len,
                size: self.len(),
            });
        }
        self.bytes.truncate(len as usize);
        Ok(())
    }

    fn read_range(&self, offset: u64, len: u64) -> Result<Vec<u8>, StoreError> {
        check_range(offset, len, self.len())?;
        let start = offset as usize;
        Ok(self.bytes[start..start + len as usize].to_vec())
    }

    fn fork(&self, len: u64) -> Result<Box<dyn ByteStore>, StoreError> {
        check_range(0, len, self.len())?;
        Ok(Box::new(MemoryStore {
            bytes: self.bytes[..len as usize].to_vec(),
        }))
    }

    fn name(&self) -> &'static str {
        "MemoryStore"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_returns_new_length() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.append(b"BT").unwrap(), 2);
        assert_eq!(store.append(b" ET").unwrap(), 5);
        assert_eq!(store.read_range(0, 5).unwrap(), b"BT ET");
    }

    #[test]
    fn test_truncate_restores_earlier_state() {
        let mut store = MemoryStore::new();
        store.append(b"keep").unwrap();
        let mark = store.len();
        store.append(b"drop").unwrap();
        store.truncate(mark).unwrap();
        assert_eq!(store.as_bytes(), b"keep");
        assert!(matches!(
            store.truncate(10),
            Err(StoreError::TruncateBeyondEnd { requested: 10, size: 4 })
        ));
    }

    #[test]
    fn test_read_range_out_of_bounds() {
        let mut store = MemoryStore::new();
        store.append(b"abc").unwrap();
        assert!(matches!(
            store.read_range(2, 5),
            Err(StoreError::OutOfBounds { offset: 2, len: 5, size: 3 })
        ));
        assert!(store.read_range(u64::MAX, 2).is_err());
    }

    #[test]
    fn test_fork_is_independent() {
        let mut store = MemoryStore::new();
        store.append(b"abcdef").unwrap();
        let mut fork = store.fork(3).unwrap();
        assert_eq!(fork.read_range(0, 3).unwrap(), b"abc");
        fork.append(b"XYZ").unwrap();
        assert_eq!(store.len(), 6);
        assert_eq!(fork.read_range(0, 6).unwrap(), b"abcXYZ");
    }
}
