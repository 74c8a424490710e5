//! Common test utilities, mock block devices and a recording visitor

#![allow(dead_code)]

pub mod builder;
pub use builder::{BuiltIso, IsoBuilder};

use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};
use iso9660::directory::record::DirectoryRecord;
use iso9660::{Iso9660Error, PathStack, Visitor};
use std::io;

/// In-memory block device for testing
#[derive(Debug, Clone)]
pub struct MemoryBlockDevice {
    pub data: Vec<u8>,
    pub block_size: usize,
}

impl MemoryBlockDevice {
    /// 2048-byte blocks
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_block_size(data, 2048)
    }

    /// Pads `data` with zeros up to a whole number of blocks
    pub fn with_block_size(mut data: Vec<u8>, block_size: usize) -> Self {
        let padded = data.len().div_ceil(block_size) * block_size;
        data.resize(padded, 0);
        Self { data, block_size }
    }
}

impl BlockIo for MemoryBlockDevice {
    type Error = io::Error;

    fn block_size(&self) -> BlockSize {
        BlockSize::new(self.block_size as u32).expect("valid block size")
    }

    fn num_blocks(&mut self) -> Result<u64, Self::Error> {
        Ok((self.data.len() / self.block_size) as u64)
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> Result<(), Self::Error> {
        let offset = start_lba.0 as usize * self.block_size;
        if offset + dst.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "read beyond end of device",
            ));
        }
        dst.copy_from_slice(&self.data[offset..offset + dst.len()]);
        Ok(())
    }

    fn write_blocks(&mut self, _start_lba: Lba, _src: &[u8]) -> Result<(), Self::Error> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "read-only test device",
        ))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// One entry reported during a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seen {
    pub path: String,
    pub depth: usize,
    pub lba: u32,
    pub size: u32,
    pub flags: String,
    pub xa: Option<String>,
}

/// Visitor that keeps everything it is told
#[derive(Debug, Default)]
pub struct Recorder {
    /// "enter <dir>", "entry <path>" and "issue <dir>" in call order
    pub events: Vec<String>,
    pub entries: Vec<Seen>,
    /// Debug rendering of each reported error
    pub issues: Vec<String>,
}

impl Recorder {
    pub fn entry_paths(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.path.as_str()).collect()
    }
}

impl Visitor for Recorder {
    fn enter_directory(&mut self, path: &PathStack, _depth: usize) {
        self.events.push(format!("enter /{}", path.to_string_lossy("/")));
    }

    fn entry(&mut self, path: &PathStack, record: &DirectoryRecord<'_>, depth: usize) {
        let name = String::from_utf8_lossy(record.name());
        let full = if path.is_empty() {
            name.into_owned()
        } else {
            format!("{}/{}", path.to_string_lossy("/"), name)
        };
        self.events.push(format!("entry {}", full));
        self.entries.push(Seen {
            path: full,
            depth,
            lba: record.extent_lba(),
            size: record.data_length(),
            flags: record.flags().to_string(),
            xa: record.xa().map(|xa| xa.to_string()),
        });
    }

    fn issue(&mut self, path: &PathStack, error: &Iso9660Error) {
        self.events.push(format!("issue /{}", path.to_string_lossy("/")));
        self.issues.push(format!("{:?}", error));
    }
}
