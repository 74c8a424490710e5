//! Path table location
//!
//! Some images are cut out of a larger container, so every recorded address
//! is off by a constant number of sectors. The type M path table is used as a
//! landmark: its first record always describes the root directory, whose
//! extent address is known from the primary descriptor.

use crate::error::{Iso9660Error, Result};
use crate::io::{ByteSource, SectorReader};
use crate::types::{VolumeSummary, SECTOR_SIZE};
use crate::utils::endian::ByteView;

/// Where the path table was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathTableMatch {
    /// Logical sector holding the path table
    pub sector: u64,
    /// Recorded minus actual location; subtract from every extent address
    pub correction: i64,
}

/// Check for a type M path table whose root record points at `root_lba`
///
/// The root record has a 1-byte identifier, the root extent as a big-endian
/// 32-bit value, parent number 1 and the identifier byte 0.
pub fn looks_like_path_table(sector: &[u8], root_lba: u32) -> bool {
    let view = ByteView::new(sector);
    view.u8_at(0) == Some(1)
        && view.u32_be(2) == Some(root_lba)
        && view.u16_be(6) == Some(1)
        && view.u8_at(8) == Some(0)
}

/// Find the path table and derive the base address correction
///
/// The recorded address is tried first. Failing that, sectors are scanned
/// forward from just past the descriptor set terminator until one matches or
/// a read fails; the first match wins.
pub fn locate_path_table<S: ByteSource>(
    reader: &mut SectorReader<S>,
    summary: &VolumeSummary,
) -> Result<PathTableMatch> {
    let mut buffer = [0u8; SECTOR_SIZE];
    let recorded = u64::from(summary.m_path_table_lba);

    if reader.read_logical(recorded, &mut buffer).is_ok()
        && looks_like_path_table(&buffer, summary.root_extent_lba)
    {
        tracing::info!(
            "Path table found at {}, assuming base offset zero.",
            recorded
        );
        return Ok(PathTableMatch {
            sector: recorded,
            correction: 0,
        });
    }

    tracing::info!("Searching for the path table...");
    let mut sector = summary.last_descriptor_sector + 1;
    while reader.read_logical(sector, &mut buffer).is_ok() {
        if looks_like_path_table(&buffer, summary.root_extent_lba) {
            let correction = recorded as i64 - sector as i64;
            tracing::info!(
                "Path table found at sector {}, assuming base offset {}.",
                sector,
                correction
            );
            return Ok(PathTableMatch { sector, correction });
        }
        sector += 1;
    }

    Err(Iso9660Error::PathTableNotFound)
}
