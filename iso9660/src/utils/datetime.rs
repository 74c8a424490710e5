//! Date/time parsing
//!
//! Volume descriptors carry 17-byte timestamps: 16 ASCII digits
//! (`YYYYMMDDhhmmsscc`) followed by a signed GMT offset in 15-minute units.

use core::fmt;

/// 17-byte ASCII datetime (volume descriptors)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime17 {
    /// Raw digit field, shown as stored
    pub digits: [u8; 16],

    /// GMT offset in 15-minute intervals (-48 to +52)
    pub gmt_offset: i8,
}

impl DateTime17 {
    /// Parse from 17-byte field
    pub fn from_bytes(bytes: &[u8; 17]) -> Self {
        let mut digits = [0u8; 16];
        digits.copy_from_slice(&bytes[..16]);
        Self {
            digits,
            gmt_offset: bytes[16] as i8,
        }
    }

    /// GMT offset as a signed `hhmm` number, e.g. `-0130` is -130
    pub fn gmt_offset_hhmm(&self) -> i32 {
        let quarters = i32::from(self.gmt_offset).abs();
        let hhmm = quarters / 4 * 100 + quarters % 4 * 15;
        if self.gmt_offset < 0 {
            -hhmm
        } else {
            hhmm
        }
    }
}

impl fmt::Display for DateTime17 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Unset timestamps are all zero bytes; stop at the first NUL.
        let end = self.digits.iter().position(|&b| b == 0).unwrap_or(16);
        write!(
            f,
            "{}{:+05}",
            String::from_utf8_lossy(&self.digits[..end]),
            self.gmt_offset_hhmm()
        )
    }
}
