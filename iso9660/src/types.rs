//! Common types and constants for ISO9660

/// Logical sector size (always 2048 bytes of payload)
pub const SECTOR_SIZE: usize = 2048;

/// Physical sector size of CD-framed images (mode 1 / mode 2 raw)
pub const RAW_SECTOR_SIZE: usize = 2352;

/// Volume descriptor set starts at sector 16
pub const VOLUME_DESCRIPTOR_START: u64 = 16;

/// Standard identifier carried by every volume descriptor
pub const STANDARD_ID: &[u8; 5] = b"CD001";

/// Volume descriptor type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VolumeDescriptorType {
    /// Boot Record (El Torito)
    BootRecord = 0,
    /// Primary Volume Descriptor
    Primary = 1,
    /// Supplementary Volume Descriptor (Joliet)
    Supplementary = 2,
    /// Volume Partition Descriptor
    Partition = 3,
    /// Volume Descriptor Set Terminator
    Terminator = 255,
}

impl VolumeDescriptorType {
    /// Map a raw type code, `None` for codes the standard leaves unassigned
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::BootRecord),
            1 => Some(Self::Primary),
            2 => Some(Self::Supplementary),
            3 => Some(Self::Partition),
            255 => Some(Self::Terminator),
            _ => None,
        }
    }
}

/// Physical layout of the image
///
/// The candidates are probed in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorMode {
    /// Plain 2048-byte sectors
    Cooked,
    /// 2352-byte sectors with a 16-byte header (mode 1)
    Raw16,
    /// 2352-byte sectors with a 24-byte header (mode 2 form 1)
    Raw24,
}

impl SectorMode {
    /// Probe order used by mode detection
    pub const CANDIDATES: [SectorMode; 3] = [Self::Cooked, Self::Raw16, Self::Raw24];

    /// Size of one physical sector in bytes
    pub fn sector_size(self) -> usize {
        match self {
            Self::Cooked => SECTOR_SIZE,
            Self::Raw16 | Self::Raw24 => RAW_SECTOR_SIZE,
        }
    }

    /// Offset of the 2048-byte payload inside a physical sector
    pub fn payload_offset(self) -> usize {
        match self {
            Self::Cooked => 0,
            Self::Raw16 => 16,
            Self::Raw24 => 24,
        }
    }
}

/// How logical sectors map onto the backing bytes
///
/// Fixed by mode detection, refined once by path table location and
/// read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageGeometry {
    /// Physical sector framing
    pub mode: SectorMode,
    /// Sectors to subtract from every recorded extent address
    pub base_correction: i64,
}

impl ImageGeometry {
    /// Geometry with no base correction
    pub fn new(mode: SectorMode) -> Self {
        Self {
            mode,
            base_correction: 0,
        }
    }

    /// Physical sector size in bytes
    pub fn sector_size(&self) -> usize {
        self.mode.sector_size()
    }

    /// Payload offset within each physical sector
    pub fn payload_offset(&self) -> usize {
        self.mode.payload_offset()
    }

    /// Byte offset of the payload of logical sector `lba`
    pub fn byte_offset(&self, lba: u64) -> u64 {
        lba * self.sector_size() as u64 + self.payload_offset() as u64
    }

    /// Translate a recorded address into the logical sector actually read
    pub fn translate(&self, address: i64) -> Option<u64> {
        let corrected = address - self.base_correction;
        u64::try_from(corrected).ok()
    }
}

/// Structural landmarks pulled from the primary volume descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeSummary {
    /// Root directory extent location (LBA)
    pub root_extent_lba: u32,

    /// Root directory extent length (bytes)
    pub root_extent_len: u32,

    /// Type M (big-endian) path table location
    pub m_path_table_lba: u32,

    /// Sector holding the descriptor set terminator
    pub last_descriptor_sector: u64,
}

/// File flags from directory record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileFlags {
    /// Hidden file
    pub hidden: bool,

    /// Directory (not a file)
    pub directory: bool,

    /// Associated file
    pub associated: bool,

    /// Extended attribute record format
    pub extended_format: bool,

    /// Owner/group permissions in extended attributes
    pub extended_permissions: bool,

    /// Reserved bits 5 and 6
    pub reserved: u8,

    /// Not final directory record for this file (multi-extent)
    pub not_final: bool,
}
