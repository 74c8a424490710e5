//! Byte sources and sector addressing
//!
//! A [`ByteSource`] is anything that can fill a buffer from an absolute byte
//! offset. [`SectorReader`] layers the detected [`ImageGeometry`] on top so the
//! decoders only ever ask for 2048-byte logical sectors.

mod block;
mod stream;

pub use block::BlockDeviceReader;
pub use stream::ImageReader;

use crate::error::{Iso9660Error, Result};
use crate::types::{ImageGeometry, SECTOR_SIZE};

/// Random-access byte source backing an image
pub trait ByteSource {
    /// Fill `buf` with the bytes starting at `offset`
    ///
    /// A source that cannot supply every byte must fail rather than return a
    /// partially filled buffer.
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        (**self).read_exact_at(offset, buf)
    }
}

/// Logical sector access over a byte source
#[derive(Debug)]
pub struct SectorReader<S> {
    source: S,
    geometry: ImageGeometry,
}

impl<S: ByteSource> SectorReader<S> {
    /// Create a reader for an already detected geometry
    pub fn new(source: S, geometry: ImageGeometry) -> Self {
        Self { source, geometry }
    }

    /// Current geometry
    pub fn geometry(&self) -> &ImageGeometry {
        &self.geometry
    }

    pub(crate) fn set_base_correction(&mut self, correction: i64) {
        self.geometry.base_correction = correction;
    }

    /// Read logical sector `lba` as laid out in the image, with no base correction
    pub fn read_logical(&mut self, lba: u64, buf: &mut [u8; SECTOR_SIZE]) -> Result<()> {
        let offset = self.geometry.byte_offset(lba);
        self.source.read_exact_at(offset, buf)
    }

    /// Read sector `index` of the extent recorded at `address`
    ///
    /// The base correction is applied to the recorded address first.
    pub fn read_extent_sector(
        &mut self,
        address: u32,
        index: u32,
        buf: &mut [u8; SECTOR_SIZE],
    ) -> Result<()> {
        let recorded = i64::from(address) + i64::from(index);
        let lba = self
            .geometry
            .translate(recorded)
            .ok_or(Iso9660Error::SectorOutOfRange {
                address: recorded - self.geometry.base_correction,
            })?;
        self.read_logical(lba, buf)
    }

    /// Give back the byte source
    pub fn into_inner(self) -> S {
        self.source
    }
}
