//! Directory record parsing and tree walking
//!
//! The walk is depth-first. Each directory is announced, all of its entries
//! are reported, and only then are its subdirectories walked, so the
//! immediate children of a directory are always listed together.

pub mod extent;
pub mod flags;
pub mod iterator;
pub mod record;

use crate::error::Iso9660Error;
use crate::io::{ByteSource, SectorReader};
use crate::path::PathStack;
use crate::types::SECTOR_SIZE;
use extent::Extent;
use iterator::SectorRecords;
use record::DirectoryRecord;

/// Receives the results of a directory walk
///
/// `path` is the path of the directory being listed, root being empty.
pub trait Visitor {
    /// A directory is about to be listed
    fn enter_directory(&mut self, path: &PathStack, depth: usize) {
        let _ = (path, depth);
    }

    /// One entry of the directory at `path` (never "." or "..")
    fn entry(&mut self, path: &PathStack, record: &DirectoryRecord<'_>, depth: usize);

    /// Part of the directory at `path` could not be read or decoded
    fn issue(&mut self, path: &PathStack, error: &Iso9660Error) {
        let _ = (path, error);
    }
}

/// Limits applied during a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Deepest subdirectory level entered; the root is level 0
    pub max_depth: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Counters describing a finished walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Directories listed, root included
    pub directories: usize,
    /// Entries reported to the visitor
    pub entries: usize,
    /// Problems reported to the visitor
    pub issues: usize,
}

impl WalkSummary {
    /// True when some part of the tree was skipped
    pub fn is_degraded(&self) -> bool {
        self.issues > 0
    }
}

/// Walk the directory tree rooted at `root`
///
/// `path` is the path of `root` and is returned in the state it was passed
/// in. Read failures and malformed records cut short the affected extent
/// only; they are reported through [`Visitor::issue`] and the walk carries on
/// with the remaining directories.
pub fn walk<S: ByteSource, V: Visitor>(
    reader: &mut SectorReader<S>,
    root: Extent,
    path: &mut PathStack,
    visitor: &mut V,
    options: &WalkOptions,
) -> WalkSummary {
    let depth_before = path.depth();
    let mut walker = Walker {
        reader,
        visitor,
        path,
        options,
        active: vec![root],
        summary: WalkSummary::default(),
        buffer: Box::new([0u8; SECTOR_SIZE]),
    };
    walker.walk_extent(root, 0);
    debug_assert_eq!(walker.path.depth(), depth_before);

    tracing::debug!(
        "walked {} directories, {} entries, {} issues",
        walker.summary.directories,
        walker.summary.entries,
        walker.summary.issues
    );
    walker.summary
}

struct Walker<'a, S, V> {
    reader: &'a mut SectorReader<S>,
    visitor: &'a mut V,
    path: &'a mut PathStack,
    options: &'a WalkOptions,
    /// Extents on the current recursion path, root first
    active: Vec<Extent>,
    summary: WalkSummary,
    buffer: Box<[u8; SECTOR_SIZE]>,
}

impl<S: ByteSource, V: Visitor> Walker<'_, S, V> {
    fn walk_extent(&mut self, extent: Extent, depth: usize) {
        self.summary.directories += 1;
        self.visitor.enter_directory(&*self.path, depth);

        let mut subdirs: Vec<(Vec<u8>, Extent)> = Vec::new();
        for index in 0..extent.sector_count() {
            if let Err(e) = self
                .reader
                .read_extent_sector(extent.lba, index, &mut self.buffer)
            {
                tracing::debug!("directory extent at {} truncated at sector {}", extent.lba, index);
                self.report(&e);
                break;
            }

            for item in SectorRecords::new(&self.buffer[..], index) {
                match item {
                    Ok(record) if record.is_self() || record.is_parent() => {}
                    Ok(record) => {
                        self.summary.entries += 1;
                        self.visitor.entry(&*self.path, &record, depth);
                        if record.is_directory() {
                            subdirs.push((record.name().to_vec(), record.extent()));
                        }
                    }
                    Err(e) => {
                        self.summary.issues += 1;
                        self.visitor.issue(&*self.path, &e);
                    }
                }
            }
        }

        for (name, child) in subdirs {
            if let Err(e) = self.enter(&name, child, depth + 1) {
                self.report(&e);
            }
        }
    }

    fn enter(&mut self, name: &[u8], child: Extent, depth: usize) -> crate::Result<()> {
        if depth > self.options.max_depth {
            return Err(Iso9660Error::DepthLimit {
                depth: self.options.max_depth,
            });
        }
        if self.active.contains(&child) {
            return Err(Iso9660Error::DirectoryLoop {
                address: child.lba,
                length: child.length,
            });
        }

        self.path.push(name)?;
        self.active.push(child);
        self.walk_extent(child, depth);
        self.active.pop();
        self.path.pop_last(1);
        Ok(())
    }

    fn report(&mut self, error: &Iso9660Error) {
        self.summary.issues += 1;
        self.visitor.issue(&*self.path, error);
    }
}
