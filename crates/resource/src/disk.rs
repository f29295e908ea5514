//! Disk cache for page content.
//!
//! Large documents keep their content streams in an anonymous temporary
//! file instead of on the heap. The file is removed by the OS once the
//! store is dropped.

use folio_traits::{ByteStore, StoreError, check_range};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A `ByteStore` backed by an anonymous temporary file.
#[derive(Debug)]
pub struct DiskStore {
    file: File,
    len: u64,
    /// Directory the file was created in, reused when forking.
    dir: Option<PathBuf>,
}

impl DiskStore {
    /// Creates a store in the system temporary directory.
    pub fn new() -> Result<Self, StoreError> {
        let file = tempfile::tempfile()?;
        log::debug!("Created disk cache in the system temp directory");
        Ok(Self {
            file,
            len: 0,
            dir: None,
        })
    }

    /// Creates a store inside `dir`.
    pub fn new_in<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let file = tempfile::tempfile_in(dir.as_ref())?;
        log::debug!("Created disk cache in {}", dir.as_ref().display());
        Ok(Self {
            file,
            len: 0,
            dir: Some(dir.as_ref().to_path_buf()),
        })
    }

    fn sibling(&self) -> Result<Self, StoreError> {
        match &self.dir {
            Some(dir) => Self::new_in(dir),
            None => Self::new(),
        }
    }
}

impl ByteStore for DiskStore {
    fn len(&self) -> u64 {
        self.len
    }

    fn append(&mut self, bytes: &[u8]) -> Result<u64, StoreError> {
        self.file.seek(SeekFrom::Start(self.len))?;
        self.file.write_all(bytes)?;
        self.len += bytes.len() as u64;
        Ok(self.len)
    }

    fn truncate(&mut self, len: u64) -> Result<(), StoreError> {
        if len > self.len {
            return Err(StoreError::TruncateBeyondEnd {
                requested: len,
                size: self.len,
            });
        }
        self.file.set_len(len)?;
        self.len = len;
        Ok(())
    }

    fn read_range(&self, offset: u64, len: u64) -> Result<Vec<u8>, StoreError> {
        check_range(offset, len, self.len)?;
        let mut file = &self.file;
        file.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; len as usize];
        file.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn fork(&self, len: u64) -> Result<Box<dyn ByteStore>, StoreError> {
        check_range(0, len, self.len)?;
        let mut fork = self.sibling()?;
        let mut source = &self.file;
        source.seek(SeekFrom::Start(0))?;
        let copied = io::copy(&mut source.take(len), &mut fork.file)?;
        fork.len = copied;
        log::debug!("Forked disk cache at {} bytes", copied);
        Ok(Box::new(fork))
    }

    fn name(&self) -> &'static str {
        "DiskStore"
    }
}
