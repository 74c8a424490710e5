//! Opening an image
//!
//! [`Image::open`] runs the decoding stages in order: sector mode detection,
//! the volume descriptor scan and the path table search. The resulting
//! geometry is fixed from then on and shared by every directory read.

use crate::directory::{self, extent::Extent, Visitor, WalkOptions, WalkSummary};
use crate::error::Result;
use crate::io::{ByteSource, SectorReader};
use crate::path::PathStack;
use crate::types::{ImageGeometry, VolumeSummary};
use crate::volume::path_table::{locate_path_table, PathTableMatch};
use crate::volume::primary::PrimaryDescriptor;
use crate::volume::{detect_mode, scan_descriptors, DescriptorEntry, ScanOptions};

/// A decoded image ready to be walked
#[derive(Debug)]
pub struct Image<S> {
    reader: SectorReader<S>,
    primary: PrimaryDescriptor,
    summary: VolumeSummary,
    descriptors: Vec<DescriptorEntry>,
    path_table: Option<PathTableMatch>,
}

impl<S: ByteSource> Image<S> {
    /// Decode the image structure with default limits
    pub fn open(source: S) -> Result<Self> {
        Self::open_with(source, &ScanOptions::default())
    }

    /// Decode the image structure
    ///
    /// Fails when no sector layout or no primary descriptor is found. A path
    /// table that cannot be found is only logged: the walk starts from the
    /// root extent and proceeds without a base correction.
    pub fn open_with(mut source: S, options: &ScanOptions) -> Result<Self> {
        let mode = detect_mode(&mut source)?;
        let mut reader = SectorReader::new(source, ImageGeometry::new(mode));

        let set = scan_descriptors(&mut reader, options)?;

        let path_table = match locate_path_table(&mut reader, &set.summary) {
            Ok(found) => {
                reader.set_base_correction(found.correction);
                Some(found)
            }
            Err(e) => {
                tracing::warn!("{}; assuming base offset zero", e);
                None
            }
        };

        Ok(Self {
            reader,
            primary: set.primary,
            summary: set.summary,
            descriptors: set.descriptors,
            path_table,
        })
    }

    /// Sector layout and base correction in use
    pub fn geometry(&self) -> &ImageGeometry {
        self.reader.geometry()
    }

    /// The primary volume descriptor
    pub fn primary(&self) -> &PrimaryDescriptor {
        &self.primary
    }

    /// Landmarks taken from the descriptor set
    pub fn summary(&self) -> &VolumeSummary {
        &self.summary
    }

    /// Every volume descriptor seen, in sector order
    pub fn descriptors(&self) -> &[DescriptorEntry] {
        &self.descriptors
    }

    /// Path table location, `None` when the search failed
    pub fn path_table(&self) -> Option<&PathTableMatch> {
        self.path_table.as_ref()
    }

    /// Extent of the root directory
    pub fn root(&self) -> Extent {
        Extent::new(self.summary.root_extent_lba, self.summary.root_extent_len)
    }

    /// Walk the whole tree from the root directory
    pub fn walk<V: Visitor>(&mut self, visitor: &mut V, options: &WalkOptions) -> WalkSummary {
        let root = self.root();
        let mut path = PathStack::new();
        directory::walk(&mut self.reader, root, &mut path, visitor, options)
    }

    /// Give back the byte source
    pub fn into_inner(self) -> S {
        self.reader.into_inner()
    }
}
