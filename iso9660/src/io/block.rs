//! Block device backed byte source

use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;

use super::ByteSource;
use crate::error::{Iso9660Error, Result};

/// Byte source over a [`BlockIo`] device
///
/// CD-framed images use 2352-byte physical sectors, which never line up with
/// device blocks, so every request reads the covering blocks and copies out
/// the requested span.
pub struct BlockDeviceReader<B> {
    block_io: B,
    start_block: u64,
    scratch: Vec<u8>,
}

impl<B: BlockIo> BlockDeviceReader<B> {
    /// Read an image that starts at block 0 of the device
    pub fn new(block_io: B) -> Self {
        Self::with_start_block(block_io, 0)
    }

    /// Read an image that starts at `start_block` (e.g. inside a partition)
    pub fn with_start_block(block_io: B, start_block: u64) -> Self {
        Self {
            block_io,
            start_block,
            scratch: Vec::new(),
        }
    }

    /// Give back the device
    pub fn into_inner(self) -> B {
        self.block_io
    }
}

impl<B: BlockIo> ByteSource for BlockDeviceReader<B> {
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }

        let block_size = u64::from(self.block_io.block_size().to_u32());
        let end = offset + buf.len() as u64;
        let first = offset / block_size;
        let last = (end - 1) / block_size;
        let count = last - first + 1;

        let num_blocks = self
            .block_io
            .num_blocks()
            .map_err(|e| Iso9660Error::BlockDevice(e.to_string()))?;
        if self.start_block + last >= num_blocks {
            return Err(Iso9660Error::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "read beyond end of device",
            )));
        }

        self.scratch.resize((count * block_size) as usize, 0);
        self.block_io
            .read_blocks(Lba(self.start_block + first), &mut self.scratch)
            .map_err(|e| Iso9660Error::BlockDevice(e.to_string()))?;

        let skip = (offset - first * block_size) as usize;
        buf.copy_from_slice(&self.scratch[skip..skip + buf.len()]);
        Ok(())
    }
}
