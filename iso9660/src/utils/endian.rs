//! Fixed-offset field access
//!
//! ISO9660 stores most integers twice, little-endian first and big-endian
//! second. Every dual-endian read here takes the trailing big-endian copy.
//! All accessors are bounds checked and return `None` past the slice end.

/// Read-only view over a decoded structure
#[derive(Debug, Clone, Copy)]
pub struct ByteView<'a> {
    data: &'a [u8],
}

impl<'a> ByteView<'a> {
    /// Wrap a byte slice
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Length of the underlying slice
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the view is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `len` bytes starting at `offset`
    pub fn bytes(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        self.data.get(offset..offset.checked_add(len)?)
    }

    /// Single byte at `offset`
    pub fn u8_at(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    /// Big-endian 16-bit value at `offset`
    pub fn u16_be(&self, offset: usize) -> Option<u16> {
        let b = self.array::<2>(offset)?;
        Some(u16::from_be_bytes(b))
    }

    /// Big-endian 32-bit value at `offset`
    pub fn u32_be(&self, offset: usize) -> Option<u32> {
        let b = self.array::<4>(offset)?;
        Some(u32::from_be_bytes(b))
    }

    /// Little-endian 32-bit value at `offset`
    pub fn u32_le(&self, offset: usize) -> Option<u32> {
        let b = self.array::<4>(offset)?;
        Some(u32::from_le_bytes(b))
    }

    /// Dual-endian 16-bit field starting at `offset`, big-endian half
    pub fn u16_trailing_be(&self, offset: usize) -> Option<u16> {
        self.u16_be(offset.checked_add(2)?)
    }

    /// Dual-endian 32-bit field starting at `offset`, big-endian half
    pub fn u32_trailing_be(&self, offset: usize) -> Option<u32> {
        self.u32_be(offset.checked_add(4)?)
    }

    fn array<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        self.bytes(offset, N)?.try_into().ok()
    }
}
