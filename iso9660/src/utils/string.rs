//! String handling utilities
//!
//! ISO9660 uses various string encodings: ASCII, d-characters, a-characters.

use std::borrow::Cow;

/// Trim trailing spaces from byte slice
pub fn trim_trailing_spaces(bytes: &[u8]) -> &[u8] {
    let mut end = bytes.len();
    while end > 0 && matches!(bytes[end - 1], b' ' | 0) {
        end -= 1;
    }
    &bytes[..end]
}

/// Convert ISO9660 a-characters to text
///
/// Filler is stripped. Bytes outside ASCII are replaced.
pub fn achars_to_str(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(trim_trailing_spaces(bytes))
}
