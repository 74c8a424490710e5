//! Sector arithmetic utilities

use crate::types::SECTOR_SIZE;

/// Calculate number of sectors needed for byte count
pub fn sectors_for_bytes(byte_count: u32) -> u32 {
    byte_count.div_ceil(SECTOR_SIZE as u32)
}
