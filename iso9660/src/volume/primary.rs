//! Primary Volume Descriptor parsing
//!
//! The Primary Volume Descriptor (PVD) is always present and describes
//! the basic ISO9660 filesystem structure. See ECMA-119 8.4 for the layout.

use crate::error::{Iso9660Error, Result};
use crate::types::SECTOR_SIZE;
use crate::utils::datetime::DateTime17;
use crate::utils::endian::ByteView;
use crate::utils::string::achars_to_str;

/// Signature of a primary descriptor: type 1, "CD001", version 1
pub const PRIMARY_SIGNATURE: &[u8; 7] = b"\x01CD001\x01";

/// Decoded Primary Volume Descriptor
#[derive(Debug, Clone)]
pub struct PrimaryDescriptor {
    /// System identifier (32 a-characters)
    pub system_id: [u8; 32],
    /// Volume identifier (32 d-characters)
    pub volume_id: [u8; 32],
    /// Volume space size in logical blocks
    pub volume_space_size: u32,
    /// Volume set size
    pub volume_set_size: u16,
    /// Volume sequence number
    pub volume_sequence_number: u16,
    /// Logical block size (usually 2048)
    pub logical_block_size: u16,
    /// Path table size in bytes
    pub path_table_size: u32,
    /// Type L path table location (little-endian field)
    pub type_l_path_table: u32,
    /// Optional type L path table location
    pub optional_type_l_path_table: u32,
    /// Type M path table location (big-endian field)
    pub type_m_path_table: u32,
    /// Optional type M path table location
    pub optional_type_m_path_table: u32,
    /// Root directory extent location
    pub root_extent_lba: u32,
    /// Root directory extent length in bytes
    pub root_extent_len: u32,
    /// Volume set identifier
    pub volume_set_id: [u8; 128],
    /// Publisher identifier
    pub publisher_id: [u8; 128],
    /// Data preparer identifier
    pub data_preparer_id: [u8; 128],
    /// Application identifier
    pub application_id: [u8; 128],
    /// Copyright file identifier
    pub copyright_file_id: [u8; 37],
    /// Abstract file identifier
    pub abstract_file_id: [u8; 37],
    /// Bibliographic file identifier
    pub bibliographic_file_id: [u8; 37],
    /// Volume creation time
    pub creation_time: DateTime17,
    /// Volume modification time
    pub modification_time: DateTime17,
    /// Volume expiration time
    pub expiration_time: DateTime17,
    /// Volume effective time
    pub effective_time: DateTime17,
}

impl PrimaryDescriptor {
    /// Parse a descriptor sector, checking its 7-byte signature
    pub fn parse(sector: &[u8; SECTOR_SIZE], lba: u64) -> Result<Self> {
        if &sector[..7] != PRIMARY_SIGNATURE {
            return Err(Iso9660Error::InvalidSignature { sector: lba });
        }

        // Every offset below is a compile-time constant inside the sector,
        // so the bounds checks cannot fail.
        let view = ByteView::new(sector);
        let u16_at = |off| view.u16_trailing_be(off).unwrap_or(0);
        let u32_at = |off| view.u32_trailing_be(off).unwrap_or(0);

        Ok(Self {
            system_id: field(sector, 8),
            volume_id: field(sector, 40),
            volume_space_size: u32_at(80),
            volume_set_size: u16_at(120),
            volume_sequence_number: u16_at(124),
            logical_block_size: u16_at(128),
            path_table_size: u32_at(132),
            type_l_path_table: view.u32_le(140).unwrap_or(0),
            optional_type_l_path_table: view.u32_le(144).unwrap_or(0),
            type_m_path_table: view.u32_be(148).unwrap_or(0),
            optional_type_m_path_table: view.u32_be(152).unwrap_or(0),
            // Root directory record is embedded at 156
            root_extent_lba: u32_at(158),
            root_extent_len: u32_at(166),
            volume_set_id: field(sector, 190),
            publisher_id: field(sector, 318),
            data_preparer_id: field(sector, 446),
            application_id: field(sector, 574),
            copyright_file_id: field(sector, 702),
            abstract_file_id: field(sector, 739),
            bibliographic_file_id: field(sector, 776),
            creation_time: DateTime17::from_bytes(&field(sector, 813)),
            modification_time: DateTime17::from_bytes(&field(sector, 830)),
            expiration_time: DateTime17::from_bytes(&field(sector, 847)),
            effective_time: DateTime17::from_bytes(&field(sector, 864)),
        })
    }

    /// Labelled fields in on-disk order, identifiers trimmed
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("System ID", achars_to_str(&self.system_id).into_owned()),
            ("Volume ID", achars_to_str(&self.volume_id).into_owned()),
            ("Volume Space Size", self.volume_space_size.to_string()),
            ("Volume Set Size", self.volume_set_size.to_string()),
            ("Volume Sequence #", self.volume_sequence_number.to_string()),
            ("Logical Block Size", self.logical_block_size.to_string()),
            ("Path Table Size", self.path_table_size.to_string()),
            ("Location of Type-L Path Table", self.type_l_path_table.to_string()),
            (
                "Location of Optional Type-L Path Table",
                self.optional_type_l_path_table.to_string(),
            ),
            ("Location of Type-M Path Table", self.type_m_path_table.to_string()),
            (
                "Location of Optional Type-M Path Table",
                self.optional_type_m_path_table.to_string(),
            ),
            ("Location of Root Directory Extent", self.root_extent_lba.to_string()),
            ("Data Length of Root Directory", self.root_extent_len.to_string()),
            ("Volume Set ID", achars_to_str(&self.volume_set_id).into_owned()),
            ("Publisher ID", achars_to_str(&self.publisher_id).into_owned()),
            ("Data Preparer ID", achars_to_str(&self.data_preparer_id).into_owned()),
            ("Application ID", achars_to_str(&self.application_id).into_owned()),
            ("Copyright File ID", achars_to_str(&self.copyright_file_id).into_owned()),
            ("Abstract File ID", achars_to_str(&self.abstract_file_id).into_owned()),
            (
                "Bibliographic File ID",
                achars_to_str(&self.bibliographic_file_id).into_owned(),
            ),
            ("Volume Creation Date/Time", self.creation_time.to_string()),
            ("Volume Modification Date/Time", self.modification_time.to_string()),
            ("Volume Expiration Date/Time", self.expiration_time.to_string()),
            ("Volume Effective Date/Time", self.effective_time.to_string()),
        ]
    }
}

fn field<const N: usize>(sector: &[u8; SECTOR_SIZE], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&sector[offset..offset + N]);
    out
}
