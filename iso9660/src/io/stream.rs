//! `Read + Seek` backed byte source

use std::io::{Read, Seek, SeekFrom};

use super::ByteSource;
use crate::error::Result;

/// Byte source over a seekable stream such as an opened image file
#[derive(Debug)]
pub struct ImageReader<R> {
    inner: R,
}

impl<R: Read + Seek> ImageReader<R> {
    /// Wrap a stream
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Give back the stream
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> ByteSource for ImageReader<R> {
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        self.inner.read_exact(buf)?;
        Ok(())
    }
}
