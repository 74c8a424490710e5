//! Error types for ISO9660 operations

use thiserror::Error;

/// Result type for ISO9660 operations
pub type Result<T> = core::result::Result<T, Iso9660Error>;

/// Errors that can occur while decoding an image
#[derive(Error, Debug)]
pub enum Iso9660Error {
    /// I/O error reading from the backing image
    #[error("I/O error reading image: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by a block device backend
    #[error("block device error: {0}")]
    BlockDevice(String),

    /// Corrected extent address falls before the start of the image
    #[error("sector address {address} lies before the start of the image")]
    SectorOutOfRange {
        /// Corrected logical sector address
        address: i64,
    },

    /// No sector layout produced the standard identifier at sector 16
    #[error("could not locate the volume descriptors")]
    NoVolumeDescriptors,

    /// The descriptor set ended without a primary volume descriptor
    #[error("could not find the primary volume descriptor")]
    NoPrimaryDescriptor,

    /// A sector inside the descriptor set lacks the "CD001" identifier
    #[error("invalid volume descriptor signature at sector {sector}")]
    InvalidSignature {
        /// Logical sector of the bad descriptor
        sector: u64,
    },

    /// The descriptor set was not closed by a terminator
    #[error("volume descriptor set terminator missing (scan stopped at sector {sector})")]
    MissingTerminator {
        /// First sector that could not be scanned
        sector: u64,
    },

    /// No sector carried the path table signature
    #[error("could not find the path table")]
    PathTableNotFound,

    /// A directory record does not fit inside its sector
    #[error("malformed directory record at sector {sector}, offset {offset}")]
    MalformedRecord {
        /// Logical sector index within the extent
        sector: u32,
        /// Byte offset of the record within the sector
        offset: usize,
    },

    /// A subdirectory points back at a directory already being walked
    #[error("directory extent (addr {address}, size {length}) loops back to an ancestor")]
    DirectoryLoop {
        /// Extent address
        address: u32,
        /// Extent length in bytes
        length: u32,
    },

    /// Directory nesting exceeded the configured limit
    #[error("directory nesting exceeds {depth} levels")]
    DepthLimit {
        /// Configured maximum depth
        depth: usize,
    },

    /// Attempt to push a zero-length path segment
    #[error("path segments must not be empty")]
    EmptySegment,

    /// Attempt to push a path segment containing a NUL byte
    #[error("path segments must not contain NUL bytes")]
    InvalidSegment,
}

/// Broad classification of an [`Iso9660Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Read or seek failure on the backing source
    Io,
    /// Signature or structure mismatch in the decoded bytes
    Format,
    /// Path storage refused a segment
    Capacity,
}

impl Iso9660Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) | Self::BlockDevice(_) | Self::SectorOutOfRange { .. } => ErrorKind::Io,
            Self::EmptySegment | Self::InvalidSegment => ErrorKind::Capacity,
            _ => ErrorKind::Format,
        }
    }
}
