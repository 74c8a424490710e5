//! File flags parsing and rendering

use core::fmt;

use crate::types::FileFlags;

/// Letters shown for set bits, least significant first
const FLAG_LETTERS: &[u8; 8] = b"HDAXM--+";

/// Letters shown for set XA attribute bits, least significant first
const XA_LETTERS: &[u8; 16] = b"rwx-rwx-rwx12iad";

impl FileFlags {
    /// Parse from raw byte
    pub fn from_byte(byte: u8) -> Self {
        Self {
            hidden: byte & 0x01 != 0,
            directory: byte & 0x02 != 0,
            associated: byte & 0x04 != 0,
            extended_format: byte & 0x08 != 0,
            extended_permissions: byte & 0x10 != 0,
            reserved: (byte >> 5) & 0x03,
            not_final: byte & 0x80 != 0,
        }
    }

    /// Convert to raw byte
    pub fn to_byte(&self) -> u8 {
        u8::from(self.hidden)
            | u8::from(self.directory) << 1
            | u8::from(self.associated) << 2
            | u8::from(self.extended_format) << 3
            | u8::from(self.extended_permissions) << 4
            | (self.reserved & 0x03) << 5
            | u8::from(self.not_final) << 7
    }
}

impl fmt::Display for FileFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bits(f, u16::from(self.to_byte()), FLAG_LETTERS)
    }
}

/// CD-ROM XA system use fields of a directory record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XaAttributes {
    /// Owner group id
    pub group_id: u16,
    /// Owner user id
    pub user_id: u16,
    /// Permission and file type bits
    pub attributes: u16,
    /// File number for interleaved files
    pub file_number: u8,
}

impl fmt::Display for XaAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bits(f, self.attributes, XA_LETTERS)
    }
}

fn write_bits(f: &mut fmt::Formatter<'_>, bits: u16, letters: &[u8]) -> fmt::Result {
    for (i, &letter) in letters.iter().enumerate() {
        let c = if bits & (1 << i) != 0 { letter } else { b'-' };
        fmt::Write::write_char(f, char::from(c))?;
    }
    Ok(())
}
