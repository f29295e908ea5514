//! Page buffers.
//!
//! A page does not own its content bytes. It records the extents of the
//! document byte store its fragments were appended to, so snapshotting a
//! page is a cheap clone of a few offsets.

use crate::graphics::GraphicsState;
use folio_traits::{ByteStore, StoreError};
use folio_types::ResourceName;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageBuffer {
    /// `(offset, len)` ranges of the byte store, in content order.
    extents: Vec<(u64, u64)>,
    /// Font resources the page's content refers to.
    pub fonts: BTreeSet<ResourceName>,
    pub graphics: GraphicsState,
}

impl PageBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fragment appended at `offset`. Fragments that directly
    /// follow the previous one extend it.
    pub fn push_extent(&mut self, offset: u64, len: u64) {
        if len == 0 {
            return;
        }
        match self.extents.last_mut() {
            Some((start, length)) if *start + *length == offset => *length += len,
            _ => self.extents.push((offset, len)),
        }
    }

    pub fn extents(&self) -> &[(u64, u64)] {
        &self.extents
    }

    pub fn content_len(&self) -> u64 {
        self.extents.iter().map(|(_, len)| len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Reassembles the page's content stream.
    pub fn read(&self, store: &dyn ByteStore) -> Result<Vec<u8>, StoreError> {
        let mut content = Vec::with_capacity(self.content_len() as usize);
        for &(offset, len) in &self.extents {
            content.extend_from_slice(&store.read_range(offset, len)?);
        }
        Ok(content)
    }
}

/// A finished page as handed to the PDF writer.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutput {
    /// 1-based.
    pub number: usize,
    pub content: Vec<u8>,
    pub fonts: Vec<ResourceName>,
    /// Points.
    pub width: f32,
    pub height: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_traits::MemoryStore;

    #[test]
    fn test_contiguous_extents_merge() {
        let mut page = PageBuffer::new();
        page.push_extent(0, 10);
        page.push_extent(10, 5);
        page.push_extent(20, 3);
        page.push_extent(23, 0);
        assert_eq!(page.extents(), &[(0, 15), (20, 3)]);
        assert_eq!(page.content_len(), 18);
    }

    #[test]
    fn test_read_interleaved_pages() {
        let mut store = MemoryStore::new();
        let mut first = PageBuffer::new();
        let mut second = PageBuffer::new();

        store.append(b"BT ").unwrap();
        first.push_extent(0, 3);
        store.append(b"q ").unwrap();
        second.push_extent(3, 2);
        store.append(b"ET").unwrap();
        first.push_extent(5, 2);

        assert_eq!(first.read(&store).unwrap(), b"BT ET");
        assert_eq!(second.read(&store).unwrap(), b"q ");
    }
}
