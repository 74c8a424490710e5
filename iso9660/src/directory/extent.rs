//! Directory extents
//!
//! Extents represent contiguous data regions on disk.

use crate::utils::sector::sectors_for_bytes;

/// Contiguous run of logical sectors holding a directory or file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    /// Starting LBA as recorded
    pub lba: u32,

    /// Length in bytes
    pub length: u32,
}

impl Extent {
    /// Create new extent
    pub fn new(lba: u32, length: u32) -> Self {
        Self { lba, length }
    }

    /// Number of 2048-byte sectors covered
    pub fn sector_count(&self) -> u32 {
        sectors_for_bytes(self.length)
    }
}
