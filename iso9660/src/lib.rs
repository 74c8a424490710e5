//! ISO9660 Image Decoder
//!
//! A read-only decoder that reconstructs the structure of an ISO9660 disc
//! image without mounting it.
//!
//! # Overview
//!
//! ISO9660 is the standard filesystem for CD-ROMs and DVDs. This crate provides:
//! - Sector layout detection for plain 2048-byte images and 2352-byte CD
//!   framing with 16- or 24-byte headers
//! - Volume descriptor parsing (Primary, with the rest of the set listed)
//! - Path table location, correcting images cut out of a larger container
//! - Directory record decoding and a depth-first tree walk with loop detection
//!
//! # Architecture
//!
//! The implementation is layered:
//! 1. **I/O layer** - Byte sources and logical sector reads
//! 2. **Volume layer** - Mode detection, descriptors from sectors 16+, path table
//! 3. **Directory layer** - Directory records and the tree walk
//!
//! # Usage
//!
//! ```no_run
//! use iso9660::{Image, ImageReader, PathStack, Visitor, WalkOptions};
//! use iso9660::directory::record::DirectoryRecord;
//!
//! struct Print;
//!
//! impl Visitor for Print {
//!     fn entry(&mut self, path: &PathStack, record: &DirectoryRecord<'_>, _depth: usize) {
//!         println!("{}/{}", path.to_string_lossy("/"), String::from_utf8_lossy(record.name()));
//!     }
//! }
//!
//! let file = std::fs::File::open("disc.iso")?;
//! let mut image = Image::open(ImageReader::new(file))?;
//! let summary = image.walk(&mut Print, &WalkOptions::default());
//! println!("{} entries", summary.entries);
//! # Ok::<(), iso9660::Iso9660Error>(())
//! ```

#![warn(missing_docs)]

pub mod directory;
pub mod error;
pub mod image;
pub mod io;
pub mod path;
pub mod types;
pub mod utils;
pub mod volume;

pub use error::{ErrorKind, Iso9660Error, Result};
pub use types::{FileFlags, ImageGeometry, SectorMode, VolumeSummary};

// High-level API exports
pub use directory::{walk, Visitor, WalkOptions, WalkSummary};
pub use image::Image;
pub use io::{BlockDeviceReader, ByteSource, ImageReader, SectorReader};
pub use path::PathStack;
pub use volume::{detect_mode, scan_descriptors, ScanOptions};
