//! Path accumulation for depth-first walks
//!
//! A [`PathStack`] keeps every segment of the current path in one buffer, each
//! terminated by a NUL byte. ISO9660 identifiers never contain NUL, so the
//! terminators double as segment boundaries and a push or pop never allocates
//! per segment.

use crate::error::{Iso9660Error, Result};

/// Stack of path segments stored as concatenated NUL-terminated strings
///
/// `buf.len()` is the total stored length including one terminator per
/// segment, and `count` always matches the number of terminators in `buf`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathStack {
    buf: Vec<u8>,
    count: usize,
}

impl PathStack {
    /// Empty path (the root)
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.count
    }

    /// True at the root
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append one segment
    pub fn push(&mut self, segment: &[u8]) -> Result<()> {
        if segment.is_empty() {
            return Err(Iso9660Error::EmptySegment);
        }
        if segment.contains(&0) {
            return Err(Iso9660Error::InvalidSegment);
        }
        self.buf.reserve(segment.len() + 1);
        self.buf.extend_from_slice(segment);
        self.buf.push(0);
        self.count += 1;
        Ok(())
    }

    /// Remove the last `n` segments; popping past the root leaves it empty
    pub fn pop_last(&mut self, n: usize) {
        for _ in 0..n {
            if self.count == 0 {
                break;
            }
            // Drop our own terminator, then scan back to the previous one
            let body = &self.buf[..self.buf.len() - 1];
            let start = body.iter().rposition(|&b| b == 0).map_or(0, |i| i + 1);
            self.buf.truncate(start);
            self.count -= 1;
        }
    }

    /// Drop every segment
    pub fn clear(&mut self) {
        self.buf.clear();
        self.count = 0;
    }

    /// Segments from the root down
    pub fn segments(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.buf.split(|&b| b == 0).take(self.count)
    }

    /// Exact length of [`render`](Self::render) output for `sep`
    pub fn length(&self, sep: &[u8]) -> usize {
        match self.count {
            0 => 0,
            n => self.buf.len() - n + sep.len() * (n - 1),
        }
    }

    /// Join the segments with `sep` into `out`
    ///
    /// Output is truncated to `out.len()`. A NUL terminator follows the path
    /// when there is room for it. Returns the number of path bytes written.
    pub fn render(&self, sep: &[u8], out: &mut [u8]) -> usize {
        let mut written = 0;
        for (i, segment) in self.segments().enumerate() {
            if i > 0 {
                written += copy_truncated(sep, &mut out[written..]);
            }
            written += copy_truncated(segment, &mut out[written..]);
        }
        if let Some(end) = out.get_mut(written) {
            *end = 0;
        }
        written
    }

    /// Rendered path as bytes, sized with [`length`](Self::length)
    pub fn to_bytes(&self, sep: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; self.length(sep)];
        self.render(sep, &mut out);
        out
    }

    /// Rendered path as text, replacing bytes that are not UTF-8
    pub fn to_string_lossy(&self, sep: &str) -> String {
        String::from_utf8_lossy(&self.to_bytes(sep.as_bytes())).into_owned()
    }
}

fn copy_truncated(src: &[u8], dst: &mut [u8]) -> usize {
    let n = src.len().min(dst.len());
    dst[..n].copy_from_slice(&src[..n]);
    n
}
