//! Volume descriptor parsing
//!
//! ISO9660 volume descriptors start at sector 16 and describe the filesystem layout.
//! Multiple descriptors may be present (Primary, Supplementary, Boot Record),
//! closed by a set terminator.

pub mod path_table;
pub mod primary;

use crate::error::{Iso9660Error, Result};
use crate::io::{ByteSource, SectorReader};
use crate::types::{
    SectorMode, VolumeDescriptorType, VolumeSummary, RAW_SECTOR_SIZE, SECTOR_SIZE, STANDARD_ID,
    VOLUME_DESCRIPTOR_START,
};
use primary::PrimaryDescriptor;

/// Limits applied while scanning the descriptor set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Stop after this many descriptors without a terminator
    pub max_descriptors: u32,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_descriptors: 100,
        }
    }
}

/// One descriptor seen during the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorEntry {
    /// Logical sector of the descriptor
    pub sector: u64,
    /// Raw type code
    pub type_code: u8,
}

impl DescriptorEntry {
    /// Known descriptor type, if any
    pub fn kind(&self) -> Option<VolumeDescriptorType> {
        VolumeDescriptorType::from_code(self.type_code)
    }
}

/// Result of a complete descriptor scan
#[derive(Debug, Clone)]
pub struct DescriptorSet {
    /// The primary volume descriptor
    pub primary: PrimaryDescriptor,
    /// Landmarks needed by the later stages
    pub summary: VolumeSummary,
    /// Every descriptor seen, terminator included
    pub descriptors: Vec<DescriptorEntry>,
}

/// Determine the physical sector layout of an image
///
/// Each candidate layout is tried in priority order by reading the physical
/// sector that would hold logical sector 16 and looking for "CD001" just past
/// the payload offset.
pub fn detect_mode<S: ByteSource>(source: &mut S) -> Result<SectorMode> {
    let mut buffer = [0u8; RAW_SECTOR_SIZE];

    for mode in SectorMode::CANDIDATES {
        let size = mode.sector_size();
        let region = &mut buffer[..size];
        if let Err(e) = source.read_exact_at(VOLUME_DESCRIPTOR_START * size as u64, region) {
            tracing::debug!("mode {}/{}: {}", size, mode.payload_offset(), e);
            continue;
        }

        let id = mode.payload_offset() + 1;
        if &region[id..id + STANDARD_ID.len()] == STANDARD_ID {
            tracing::info!("Mode {}/{}", size, mode.payload_offset());
            return Ok(mode);
        }
    }

    Err(Iso9660Error::NoVolumeDescriptors)
}

/// Walk the volume descriptor set starting at sector 16
///
/// Stops at the set terminator. The first primary descriptor is retained;
/// later ones are logged and ignored.
pub fn scan_descriptors<S: ByteSource>(
    reader: &mut SectorReader<S>,
    options: &ScanOptions,
) -> Result<DescriptorSet> {
    let mut buffer = [0u8; SECTOR_SIZE];
    let mut primary: Option<PrimaryDescriptor> = None;
    let mut descriptors = Vec::new();

    let end = VOLUME_DESCRIPTOR_START + u64::from(options.max_descriptors);
    for sector in VOLUME_DESCRIPTOR_START..end {
        if let Err(e) = reader.read_logical(sector, &mut buffer) {
            tracing::debug!("descriptor scan stopped at {}: {}", sector, e);
            return Err(missing_terminator(primary.is_some(), sector));
        }

        // Only the primary descriptor's version is checked (by its parser);
        // enhanced descriptors carry version 2
        if &buffer[1..6] != STANDARD_ID {
            return Err(Iso9660Error::InvalidSignature { sector });
        }

        let type_code = buffer[0];
        tracing::info!("Volume descriptor at {}: {}", sector, type_code);
        descriptors.push(DescriptorEntry { sector, type_code });

        match VolumeDescriptorType::from_code(type_code) {
            Some(VolumeDescriptorType::Primary) => {
                if primary.is_some() {
                    tracing::warn!("ignoring additional primary descriptor at {}", sector);
                } else {
                    primary = Some(PrimaryDescriptor::parse(&buffer, sector)?);
                }
            }
            Some(VolumeDescriptorType::Terminator) => {
                let primary = primary.ok_or(Iso9660Error::NoPrimaryDescriptor)?;
                let summary = VolumeSummary {
                    root_extent_lba: primary.root_extent_lba,
                    root_extent_len: primary.root_extent_len,
                    m_path_table_lba: primary.type_m_path_table,
                    last_descriptor_sector: sector,
                };
                return Ok(DescriptorSet {
                    primary,
                    summary,
                    descriptors,
                });
            }
            _ => {}
        }
    }

    Err(missing_terminator(primary.is_some(), end))
}

fn missing_terminator(have_primary: bool, sector: u64) -> Iso9660Error {
    if have_primary {
        Iso9660Error::MissingTerminator { sector }
    } else {
        Iso9660Error::NoPrimaryDescriptor
    }
}
