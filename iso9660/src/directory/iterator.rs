//! Directory iteration
//!
//! Iterator over the records packed into one directory sector.

use crate::directory::record::DirectoryRecord;
use crate::error::{Iso9660Error, Result};

/// Records of a single 2048-byte directory sector
///
/// Records never straddle sectors. A zero length byte, or running out of
/// sector, ends the sector. A record that would overrun the sector yields one
/// [`Iso9660Error::MalformedRecord`] and ends iteration.
pub struct SectorRecords<'a> {
    sector: &'a [u8],
    index: u32,
    offset: usize,
    done: bool,
}

impl<'a> SectorRecords<'a> {
    /// Iterate `sector`, which is sector `index` of its extent
    pub fn new(sector: &'a [u8], index: u32) -> Self {
        Self {
            sector,
            index,
            offset: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for SectorRecords<'a> {
    type Item = Result<DirectoryRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // Zero-length record (or end of sector): nothing more in this sector
        let rest = match self.sector.get(self.offset..) {
            Some(rest) if rest.first().is_some_and(|&len| len != 0) => rest,
            _ => {
                self.done = true;
                return None;
            }
        };

        match DirectoryRecord::parse(rest) {
            Some(record) => {
                self.offset += record.length();
                Some(Ok(record))
            }
            None => {
                self.done = true;
                Some(Err(Iso9660Error::MalformedRecord {
                    sector: self.index,
                    offset: self.offset,
                }))
            }
        }
    }
}
