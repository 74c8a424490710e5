//! Text rendering of a directory walk

use std::io::{self, Write};

use iso9660::directory::record::DirectoryRecord;
use iso9660::{Iso9660Error, PathStack, Visitor};

/// Writes the tree listing to `out` and problems to `err`
///
/// Visitor callbacks cannot fail, so the first write error is kept and
/// returned by [`Dump::finish`]. Nothing more is written after it.
pub struct Dump<W, E> {
    out: W,
    err: E,
    indent: bool,
    failed: Option<io::Error>,
}

impl<W: Write, E: Write> Dump<W, E> {
    pub fn new(out: W, err: E, indent: bool) -> Self {
        Self {
            out,
            err,
            indent,
            failed: None,
        }
    }

    /// Flush the listing and surface any write error
    pub fn finish(mut self) -> io::Result<()> {
        if let Some(e) = self.failed.take() {
            return Err(e);
        }
        self.out.flush()?;
        self.err.flush()
    }

    fn guard(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.failed.get_or_insert(e);
        }
    }

    fn write_entry(&mut self, record: &DirectoryRecord<'_>, depth: usize) -> io::Result<()> {
        let out = &mut self.out;
        if self.indent {
            for _ in 0..depth {
                out.write_all(b"  ")?;
            }
        }
        out.write_all(record.name())?;
        write!(
            out,
            " (addr {}, size {}, {})",
            record.extent_lba(),
            record.data_length(),
            record.flags()
        )?;
        if let Some(xa) = record.xa() {
            write!(out, " XA[{}]", xa)?;
        }
        writeln!(out)
    }
}

impl<W: Write, E: Write> Visitor for Dump<W, E> {
    fn enter_directory(&mut self, path: &PathStack, depth: usize) {
        if self.failed.is_some() {
            return;
        }
        let separator = if depth > 0 { "\n" } else { "" };
        let result = write!(self.out, "{}/{}\n\n", separator, path.to_string_lossy("/"));
        self.guard(result);
    }

    fn entry(&mut self, _path: &PathStack, record: &DirectoryRecord<'_>, depth: usize) {
        if self.failed.is_some() {
            return;
        }
        let result = self.write_entry(record, depth);
        self.guard(result);
    }

    fn issue(&mut self, path: &PathStack, error: &Iso9660Error) {
        if self.failed.is_some() {
            return;
        }
        let result = writeln!(self.err, "warning: /{}: {}", path.to_string_lossy("/"), error);
        self.guard(result);
    }
}
