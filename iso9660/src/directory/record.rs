//! Directory Record structure
//!
//! Directory records describe files and subdirectories. Layout (ECMA-119 9.1):
//!
//! | offset | size | field                               |
//! |--------|------|-------------------------------------|
//! | 0      | 1    | record length                       |
//! | 1      | 1    | extended attribute record length    |
//! | 2      | 8    | extent location (both-endian)       |
//! | 10     | 8    | data length (both-endian)           |
//! | 18     | 7    | recording date and time             |
//! | 25     | 1    | file flags                          |
//! | 26     | 1    | file unit size                      |
//! | 27     | 1    | interleave gap size                 |
//! | 28     | 4    | volume sequence number (both-endian)|
//! | 32     | 1    | file identifier length              |
//! | 33     | n    | file identifier, then padding       |
//!
//! The system use area follows the identifier and its padding byte.

use super::extent::Extent;
use super::flags::XaAttributes;
use crate::types::FileFlags;
use crate::utils::endian::ByteView;

const EXTENT_LBA: usize = 2;
const DATA_LENGTH: usize = 10;
const FILE_FLAGS: usize = 25;
const NAME_LENGTH: usize = 32;
const NAME: usize = 33;

/// Size of the XA system use block
const XA_LENGTH: usize = 14;

/// "XA" signature at offset 6 of the system use area
const XA_SIGNATURE: u16 = 0x5841;

/// Borrowed view of one directory record
#[derive(Debug, Clone, Copy)]
pub struct DirectoryRecord<'a> {
    raw: &'a [u8],
}

impl<'a> DirectoryRecord<'a> {
    /// Fixed part of a record, up to and including the name length byte
    pub const HEADER_LENGTH: usize = NAME;

    /// Parse the record at the start of `data`
    ///
    /// `data` is the remainder of the sector. Returns `None` when the length
    /// byte is zero or when the record or its identifier would extend past
    /// the end of `data`.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let length = usize::from(*data.first()?);
        if length < Self::HEADER_LENGTH + 1 || length > data.len() {
            return None;
        }

        let name_len = usize::from(data[NAME_LENGTH]);
        if name_len == 0 || NAME + name_len > length {
            return None;
        }

        Some(Self {
            raw: &data[..length],
        })
    }

    /// Total record length in bytes
    pub fn length(&self) -> usize {
        self.raw.len()
    }

    /// Extent location from the big-endian copy
    pub fn extent_lba(&self) -> u32 {
        self.view().u32_trailing_be(EXTENT_LBA).unwrap_or(0)
    }

    /// Data length from the big-endian copy
    pub fn data_length(&self) -> u32 {
        self.view().u32_trailing_be(DATA_LENGTH).unwrap_or(0)
    }

    /// Extent described by this record
    pub fn extent(&self) -> Extent {
        Extent::new(self.extent_lba(), self.data_length())
    }

    /// Raw flags byte
    pub fn flags_byte(&self) -> u8 {
        self.raw[FILE_FLAGS]
    }

    /// Parse file flags
    pub fn flags(&self) -> FileFlags {
        FileFlags::from_byte(self.flags_byte())
    }

    /// Is this a directory?
    pub fn is_directory(&self) -> bool {
        self.flags().directory
    }

    /// File identifier bytes, version suffix included
    pub fn name(&self) -> &'a [u8] {
        let len = usize::from(self.raw[NAME_LENGTH]);
        &self.raw[NAME..NAME + len]
    }

    /// The "." record of a directory
    pub fn is_self(&self) -> bool {
        self.name() == [0x00]
    }

    /// The ".." record of a directory
    pub fn is_parent(&self) -> bool {
        self.name() == [0x01]
    }

    /// Bytes after the identifier and its padding
    pub fn system_use(&self) -> &'a [u8] {
        let name_len = self.name().len();
        // One pad byte keeps the system use area on an even offset
        let start = NAME + name_len + usize::from(name_len % 2 == 0);
        self.raw.get(start..).unwrap_or(&[])
    }

    /// CD-ROM XA attributes, when the system use area carries them
    pub fn xa(&self) -> Option<XaAttributes> {
        let su = ByteView::new(self.system_use());
        if su.len() < XA_LENGTH || su.u16_be(6)? != XA_SIGNATURE {
            return None;
        }
        Some(XaAttributes {
            group_id: su.u16_be(0)?,
            user_id: su.u16_be(2)?,
            attributes: su.u16_be(4)?,
            file_number: su.u8_at(8)?,
        })
    }

    fn view(&self) -> ByteView<'a> {
        ByteView::new(self.raw)
    }
}
