//! Byte-level persistent piece-sequence text buffer.
//!
//! ## rope/ Invariants
//! - `length` always equals the sum of every piece's length.
//! - Every piece's bytes lie entirely within one arena chunk; chunks are appended, never mutated
//!   or removed, so a piece (and anything built from it, such as a [`Snapshot`]) stays valid for
//!   the lifetime of the [`Rope`] that produced it.
//! - The buffer's bytes always form well-formed UTF-8; [`Rope::insert`] rejects anything else
//!   before any piece is allocated.

use crate::error::{CoreError, Result};
use std::sync::Arc;

mod utf8;

/// An append-only store of immutable byte chunks. Chunks are never mutated or freed individually;
/// a piece referencing chunk `i` stays valid no matter how many later chunks are appended.
#[derive(Debug, Default)]
struct Arena {
    chunks: Vec<Arc<[u8]>>,
}

impl Arena {
    fn push(&mut self, bytes: &[u8]) -> usize {
        let idx = self.chunks.len();
        self.chunks.push(Arc::from(bytes));
        idx
    }

    fn chunk(&self, idx: usize) -> &[u8] {
        &self.chunks[idx]
    }
}

/// An immutable view `{chunk, start, len}` into arena-owned storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Piece {
    chunk: usize,
    start: usize,
    len: usize,
}

impl Piece {
    fn bytes<'a>(&self, arena: &'a Arena) -> &'a [u8] {
        &arena.chunk(self.chunk)[self.start..self.start + self.len]
    }
}

#[derive(Debug, Clone, Copy)]
enum LineCache {
    Dirty,
    Computed(usize),
}

/// A frozen, cheap copy of a rope's piece sequence at a point in time.
///
/// A snapshot shares storage with the rope that produced it: because the arena only ever appends
/// chunks, the bytes a snapshot's pieces reference remain valid across any number of subsequent
/// edits to the live rope. A snapshot must not be [`Rope::restore`]d into a different `Rope`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pieces: Vec<Piece>,
    length: usize,
}

/// A view into a rope's contents, avoiding a copy when the requested range lies within a single
/// piece.
#[derive(Debug)]
pub enum RopeSlice<'a> {
    Borrowed(&'a [u8]),
    Owned(Vec<u8>),
}

impl<'a> std::ops::Deref for RopeSlice<'a> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            RopeSlice::Borrowed(b) => b,
            RopeSlice::Owned(v) => v,
        }
    }
}

impl<'a> PartialEq<&str> for RopeSlice<'a> {
    fn eq(&self, other: &&str) -> bool {
        &**self == other.as_bytes()
    }
}

/// Byte offset and column position of an offset within the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

/// A persistent piece-sequence text buffer over raw UTF-8 bytes.
#[derive(Debug, Default)]
pub struct Rope {
    arena: Arena,
    pieces: Vec<Piece>,
    length: usize,
    line_cache: std::cell::Cell<LineCache>,
}

impl Rope {
    pub fn new() -> Self {
        Self {
            arena: Arena::default(),
            pieces: Vec::new(),
            length: 0,
            line_cache: std::cell::Cell::new(LineCache::Computed(1)),
        }
    }

    /// Builds a rope preloaded with `bytes`, failing if `bytes` is not well-formed UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut rope = Self::new();
        rope.insert(0, bytes)?;
        Ok(rope)
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    fn invalidate_lines(&self) {
        self.line_cache.set(LineCache::Dirty);
    }

    /// Locates the piece index and in-piece byte offset containing global offset `pos`.
    ///
    /// At a boundary between two pieces, resolves to the *start* of the following piece rather
    /// than the end of the preceding one, except at `pos == length`, which resolves to the end of
    /// the last piece (so callers get a piece index that's always valid for a non-empty rope,
    /// instead of a one-past-the-end sentinel that would make range scans walk off the piece
    /// list). An empty rope resolves any `pos` (must be 0) to `(0, 0)`.
    fn locate(&self, pos: usize) -> (usize, usize) {
        if self.pieces.is_empty() {
            return (0, 0);
        }
        let last = self.pieces.len() - 1;
        let mut consumed = 0;
        for (idx, piece) in self.pieces.iter().enumerate() {
            if pos < consumed + piece.len || idx == last {
                return (idx, pos - consumed);
            }
            consumed += piece.len;
        }
        unreachable!("loop always returns at the last piece")
    }

    /// Inserts `bytes` at byte offset `pos`. Fails with `InvalidUtf8` before any piece is
    /// allocated if `bytes` is not well-formed UTF-8, and with `OutOfBounds` if `pos > len()`.
    pub fn insert(&mut self, pos: usize, bytes: &[u8]) -> Result<()> {
        if pos > self.length {
            return Err(CoreError::out_of_bounds(format!(
                "insert position {pos} exceeds length {}",
                self.length
            )));
        }
        if bytes.is_empty() {
            return Ok(());
        }
        utf8::validate(bytes)?;

        let chunk = self.arena.push(bytes);
        let new_piece = Piece {
            chunk,
            start: 0,
            len: bytes.len(),
        };

        let (piece_idx, local_off) = self.locate(pos);
        if piece_idx == self.pieces.len() {
            self.pieces.push(new_piece);
        } else if local_off == 0 {
            self.pieces.insert(piece_idx, new_piece);
        } else if local_off == self.pieces[piece_idx].len {
            self.pieces.insert(piece_idx + 1, new_piece);
        } else {
            let original = self.pieces[piece_idx];
            let prefix = Piece {
                chunk: original.chunk,
                start: original.start,
                len: local_off,
            };
            let suffix = Piece {
                chunk: original.chunk,
                start: original.start + local_off,
                len: original.len - local_off,
            };
            tracing::trace!(pos, piece_idx, local_off, "splitting piece for interior insert");
            self.pieces
                .splice(piece_idx..=piece_idx, [prefix, new_piece, suffix]);
        }

        self.length += bytes.len();
        self.invalidate_lines();
        Ok(())
    }

    /// Deletes `len` bytes starting at `start`. Fails with `OutOfBounds` if the range exits the
    /// buffer.
    pub fn delete(&mut self, start: usize, len: usize) -> Result<()> {
        if len == 0 {
            if start > self.length {
                return Err(CoreError::out_of_bounds(format!(
                    "delete start {start} exceeds length {}",
                    self.length
                )));
            }
            return Ok(());
        }
        let end = start
            .checked_add(len)
            .ok_or_else(|| CoreError::out_of_bounds("delete range overflows"))?;
        if end > self.length {
            return Err(CoreError::out_of_bounds(format!(
                "delete range {start}..{end} exceeds length {}",
                self.length
            )));
        }

        let (start_idx, start_off) = self.locate(start);
        let (end_idx, end_off) = self.locate(end);

        if start_idx == end_idx {
            let piece = self.pieces[start_idx];
            let mut replacement = Vec::new();
            if start_off > 0 {
                replacement.push(Piece {
                    chunk: piece.chunk,
                    start: piece.start,
                    len: start_off,
                });
            }
            if end_off < piece.len {
                replacement.push(Piece {
                    chunk: piece.chunk,
                    start: piece.start + end_off,
                    len: piece.len - end_off,
                });
            }
            self.pieces.splice(start_idx..=start_idx, replacement);
        } else {
            let start_piece = self.pieces[start_idx];
            let end_piece = self.pieces[end_idx];
            let mut replacement = Vec::new();
            if start_off > 0 {
                replacement.push(Piece {
                    chunk: start_piece.chunk,
                    start: start_piece.start,
                    len: start_off,
                });
            }
            if end_off < end_piece.len {
                replacement.push(Piece {
                    chunk: end_piece.chunk,
                    start: end_piece.start + end_off,
                    len: end_piece.len - end_off,
                });
            }
            tracing::debug!(
                start,
                end,
                start_idx,
                end_idx,
                "delete spans {} pieces",
                end_idx - start_idx + 1
            );
            self.pieces.splice(start_idx..=end_idx, replacement);
        }

        self.length -= len;
        self.invalidate_lines();
        Ok(())
    }

    /// Returns a view over `[start, end)`. Zero-copy when the range lies within one piece.
    pub fn slice(&self, start: usize, end: usize) -> Result<RopeSlice<'_>> {
        if start > end {
            return Err(CoreError::invalid_range(format!("start {start} > end {end}")));
        }
        if end > self.length {
            return Err(CoreError::out_of_bounds(format!(
                "range end {end} exceeds length {}",
                self.length
            )));
        }
        if start == end {
            return Ok(RopeSlice::Borrowed(&[]));
        }

        let (start_idx, start_off) = self.locate(start);
        let (end_idx, end_off) = self.locate(end);

        if start_idx == end_idx {
            let piece = &self.pieces[start_idx];
            return Ok(RopeSlice::Borrowed(
                &piece.bytes(&self.arena)[start_off..end_off],
            ));
        }
        // end may have resolved one piece past where start_idx..end_idx expects if end sits
        // exactly on a piece boundary; normalize by treating end_off==0 as "up to end_idx
        // exclusive".
        let last_idx = if end_off == 0 { end_idx } else { end_idx + 1 };

        let mut out = Vec::with_capacity(end - start);
        for (idx, piece) in self.pieces[start_idx..last_idx].iter().enumerate() {
            let bytes = piece.bytes(&self.arena);
            let lo = if start_idx + idx == start_idx { start_off } else { 0 };
            let hi = if start_idx + idx + 1 == last_idx && end_off != 0 {
                end_off
            } else {
                bytes.len()
            };
            out.extend_from_slice(&bytes[lo..hi]);
        }
        Ok(RopeSlice::Owned(out))
    }

    /// Returns successive zero-copy byte segments covering `[start, end)` in order.
    pub fn iter_chunks(&self, start: usize, end: usize) -> Result<ChunkIter<'_>> {
        if start > end {
            return Err(CoreError::invalid_range(format!("start {start} > end {end}")));
        }
        if end > self.length {
            return Err(CoreError::out_of_bounds(format!(
                "range end {end} exceeds length {}",
                self.length
            )));
        }
        Ok(ChunkIter {
            rope: self,
            pos: start,
            end,
        })
    }

    fn recompute_line_count(&self) -> usize {
        let mut count = 1;
        for piece in &self.pieces {
            count += bytecount_newlines(piece.bytes(&self.arena));
        }
        count
    }

    /// Number of lines in the buffer; an empty buffer has one (empty) line.
    pub fn line_count(&self) -> usize {
        match self.line_cache.get() {
            LineCache::Computed(n) => n,
            LineCache::Dirty => {
                let n = self.recompute_line_count();
                self.line_cache.set(LineCache::Computed(n));
                n
            }
        }
    }

    /// Byte range `[start, end)` of line `n` (0-based), excluding its terminating newline.
    pub fn line_range(&self, n: usize) -> Result<(usize, usize)> {
        let total_lines = self.line_count();
        if n >= total_lines {
            return Err(CoreError::out_of_bounds(format!(
                "line {n} exceeds line count {total_lines}"
            )));
        }
        let mut line = 0;
        let mut line_start = 0;
        let mut offset = 0;
        for piece in &self.pieces {
            let bytes = piece.bytes(&self.arena);
            for (i, &b) in bytes.iter().enumerate() {
                if b == b'\n' {
                    if line == n {
                        return Ok((line_start, offset + i));
                    }
                    line += 1;
                    line_start = offset + i + 1;
                }
            }
            offset += bytes.len();
        }
        // last line, no trailing newline
        Ok((line_start, self.length))
    }

    /// Resolves a byte offset to a `{line, column}` pair. Column is measured in bytes from the
    /// preceding newline, not grapheme clusters.
    pub fn line_column_at_offset(&self, offset: usize) -> Result<LineColumn> {
        if offset > self.length {
            return Err(CoreError::out_of_bounds(format!(
                "offset {offset} exceeds length {}",
                self.length
            )));
        }
        let mut line = 0;
        let mut line_start = 0;
        let mut consumed = 0;
        'outer: for piece in &self.pieces {
            let bytes = piece.bytes(&self.arena);
            for (i, &b) in bytes.iter().enumerate() {
                if consumed + i == offset {
                    break 'outer;
                }
                if b == b'\n' {
                    line += 1;
                    line_start = consumed + i + 1;
                }
            }
            consumed += bytes.len();
        }
        Ok(LineColumn {
            line,
            column: offset - line_start,
        })
    }

    /// Takes a cheap, frozen copy of the current piece sequence.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pieces: self.pieces.clone(),
            length: self.length,
        }
    }

    /// Replaces the live piece sequence with `snapshot`'s. `snapshot` must have been produced by
    /// this same `Rope` (or one sharing its arena lineage); restoring a foreign snapshot produces
    /// pieces that index into chunks this rope never allocated.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.pieces = snapshot.pieces.clone();
        self.length = snapshot.length;
        self.invalidate_lines();
    }

    /// Materializes the whole buffer as an owned `String`. Convenience wrapper over `slice`.
    pub fn to_string_lossy(&self) -> String {
        let slice = self
            .slice(0, self.length)
            .expect("0..length is always a valid range");
        String::from_utf8_lossy(&slice).into_owned()
    }
}

fn bytecount_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

/// Lazy, forward-only iterator over zero-copy byte segments of a range.
pub struct ChunkIter<'a> {
    rope: &'a Rope,
    pos: usize,
    end: usize,
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.pos >= self.end {
            return None;
        }
        let (idx, off) = self.rope.locate(self.pos);
        let piece = &self.rope.pieces[idx];
        let bytes = piece.bytes(&self.rope.arena);
        let take_end = (self.end - (self.pos - off)).min(bytes.len());
        let segment = &bytes[off..take_end];
        self.pos += segment.len();
        Some(segment)
    }
}
