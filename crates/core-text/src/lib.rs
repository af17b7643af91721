//! Bounded line store backing every editing surface.
//!
//! The document is an ordered sequence of owned byte lines. Two bounds apply,
//! both carried by [`Limits`] so tests can shrink them:
//! * at most `max_lines` entries;
//! * each entry holds at most `line_len - 1` bytes (the historical buffer size
//!   minus its terminator). Newlines are never stored.
//!
//! Invariants (hold after every public call):
//! * Entries `[0, line_count)` are contiguous and valid; there is no unused slot
//!   inside the document.
//! * A failed operation leaves `line_count` and every entry untouched. Shifts are
//!   committed only after capacity (and allocation) has been confirmed.
//! * Each slot exclusively owns its buffer. Replacing content always installs a
//!   freshly built buffer and drops the previous one.
//!
//! Lines are plain bytes: no Unicode segmentation, no width tables.

use tracing::{debug, trace, warn};

mod error;
pub mod subst;

pub use error::StoreError;

/// Default maximum number of lines in a document.
pub const MAX_LINES: usize = 1200;
/// Default line buffer size; stored lines hold at most `LINE_LEN - 1` bytes.
pub const LINE_LEN: usize = 256;

/// Capacity bounds applied by a [`LineStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_lines: usize,
    pub line_len: usize,
}

impl Limits {
    pub const fn new(max_lines: usize, line_len: usize) -> Self {
        Self {
            max_lines,
            line_len,
        }
    }

    /// Longest content (in bytes) a single line may hold.
    pub const fn max_line_bytes(&self) -> usize {
        self.line_len.saturating_sub(1)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(MAX_LINES, LINE_LEN)
    }
}

/// A position inside the store expressed as (row index, byte column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// Outcome of a backspace / delete at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Nothing changed (start of document, end of document, or a join that would overflow).
    None,
    /// A single byte was removed inside the current line.
    Byte,
    /// Two lines were joined; the row count shrank by one.
    Join,
}

/// Summary returned by [`LineStore::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub lines: usize,
    /// Lines that were cut down to `line_len - 1` bytes.
    pub truncated_lines: usize,
    /// Lines dropped because the document reached `max_lines`.
    pub dropped_lines: usize,
}

/// Bounded, ordered collection of owned byte lines.
#[derive(Debug, Clone, Default)]
pub struct LineStore {
    lines: Vec<Vec<u8>>,
    limits: Limits,
}

impl LineStore {
    /// Empty store with default limits.
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Empty store with explicit limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            lines: Vec::new(),
            limits,
        }
    }

    /// Build a store from in-memory lines (test and bootstrap convenience).
    pub fn from_lines<I, L>(limits: Limits, lines: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut store = Self::with_limits(limits);
        store.load(lines)?;
        Ok(store)
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Content of line `idx` (0-based) or `None` when out of range.
    pub fn line(&self, idx: usize) -> Option<&[u8]> {
        self.lines.get(idx).map(Vec::as_slice)
    }

    /// Byte length of line `idx`; 0 for rows outside the document.
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map_or(0, Vec::len)
    }

    /// Iterate all lines in order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.lines.iter().map(Vec::as_slice)
    }

    /// Open `count` empty slots at `pos`, shifting lines at/after `pos` forward.
    ///
    /// Fails without mutation when the resulting size would exceed `max_lines`.
    pub fn insert_gap(&mut self, pos: usize, count: usize) -> Result<(), StoreError> {
        if count == 0 {
            return Ok(());
        }
        let pos = pos.min(self.lines.len());
        if self.lines.len() + count > self.limits.max_lines {
            warn!(target: "store", pos, count, line_count = self.lines.len(), "capacity_exceeded");
            return Err(StoreError::CapacityExceeded {
                max: self.limits.max_lines,
            });
        }
        self.lines
            .try_reserve(count)
            .map_err(|_| StoreError::AllocationFailure)?;
        self.lines
            .splice(pos..pos, std::iter::repeat_with(Vec::new).take(count));
        trace!(target: "store", pos, count, line_count = self.lines.len(), "insert_gap");
        Ok(())
    }

    /// Remove `count` lines starting at `pos`, shifting later lines backward.
    ///
    /// Removed buffers are dropped here; out-of-range spans are clipped.
    pub fn close_gap(&mut self, pos: usize, count: usize) {
        let start = pos.min(self.lines.len());
        let end = pos.saturating_add(count).min(self.lines.len());
        if start == end {
            return;
        }
        self.lines.drain(start..end);
        trace!(target: "store", pos, count = end - start, line_count = self.lines.len(), "close_gap");
    }

    /// Replace line `idx` with `text`, truncated to `line_len - 1` bytes.
    ///
    /// Returns `true` when truncation happened. The previous buffer is dropped
    /// only after the replacement was built.
    pub fn set_line(&mut self, idx: usize, text: &[u8]) -> Result<bool, StoreError> {
        if idx >= self.lines.len() {
            return Err(StoreError::OutOfRange {
                idx,
                line_count: self.lines.len(),
            });
        }
        let (owned, truncated) = self.build_line(text)?;
        self.lines[idx] = owned;
        Ok(truncated)
    }

    /// Insert a single line at `pos` (gap of one, then install content).
    pub fn insert_line(&mut self, pos: usize, text: &[u8]) -> Result<bool, StoreError> {
        let (owned, truncated) = self.build_line(text)?;
        self.insert_gap(pos, 1)?;
        let pos = pos.min(self.lines.len() - 1);
        self.lines[pos] = owned;
        Ok(truncated)
    }

    /// Discard the whole document and repopulate it from `lines`.
    ///
    /// Lines are truncated to `line_len - 1` bytes; lines past `max_lines` are
    /// dropped and reported. On allocation failure the store is left empty and the
    /// error is returned; callers treat that as terminal for the document.
    pub fn load<I, L>(&mut self, lines: I) -> Result<LoadReport, StoreError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        self.lines.clear();
        let mut report = LoadReport::default();
        for line in lines {
            if self.lines.len() >= self.limits.max_lines {
                report.dropped_lines += 1;
                continue;
            }
            let built = self.build_line(line.as_ref()).and_then(|built| {
                self.lines
                    .try_reserve(1)
                    .map_err(|_| StoreError::AllocationFailure)?;
                Ok(built)
            });
            let (owned, truncated) = match built {
                Ok(b) => b,
                Err(e) => {
                    self.lines = Vec::new();
                    return Err(e);
                }
            };
            if truncated {
                report.truncated_lines += 1;
            }
            self.lines.push(owned);
        }
        report.lines = self.lines.len();
        debug!(
            target: "store",
            lines = report.lines,
            truncated = report.truncated_lines,
            dropped = report.dropped_lines,
            "load"
        );
        Ok(report)
    }

    /// Append an empty line when the document has none, so a cursor has a valid row.
    pub fn ensure_nonempty(&mut self) -> Result<(), StoreError> {
        if self.lines.is_empty() {
            self.insert_gap(0, 1)?;
        }
        Ok(())
    }

    /// Insert byte `b` at `pos` and advance the column.
    ///
    /// Returns `false` (no change) when the line is already at its byte limit or
    /// `pos.row` is outside the document.
    pub fn insert_byte(&mut self, pos: &mut Position, b: u8) -> bool {
        let max = self.limits.max_line_bytes();
        let Some(line) = self.lines.get_mut(pos.row) else {
            return false;
        };
        pos.col = pos.col.min(line.len());
        if line.len() >= max {
            return false;
        }
        if line.try_reserve(1).is_err() {
            return false;
        }
        line.insert(pos.col, b);
        pos.col += 1;
        true
    }

    /// Split the line at `pos`; the tail becomes a new line below and the cursor
    /// moves to its start.
    pub fn split_line(&mut self, pos: &mut Position) -> Result<(), StoreError> {
        if pos.row >= self.lines.len() {
            return Err(StoreError::OutOfRange {
                idx: pos.row,
                line_count: self.lines.len(),
            });
        }
        let col = pos.col.min(self.lines[pos.row].len());
        let mut tail = Vec::new();
        tail.try_reserve_exact(self.lines[pos.row].len() - col)
            .map_err(|_| StoreError::AllocationFailure)?;
        self.insert_gap(pos.row + 1, 1)?;
        tail.extend_from_slice(&self.lines[pos.row][col..]);
        self.lines[pos.row].truncate(col);
        self.lines[pos.row + 1] = tail;
        pos.row += 1;
        pos.col = 0;
        Ok(())
    }

    /// Backspace semantics: remove the byte before `pos`, or join the current line
    /// onto the previous one when at column 0.
    pub fn delete_byte_before(&mut self, pos: &mut Position) -> Removal {
        if pos.row >= self.lines.len() {
            return Removal::None;
        }
        if pos.col > 0 {
            let line = &mut self.lines[pos.row];
            pos.col = pos.col.min(line.len());
            if pos.col == 0 {
                return Removal::None;
            }
            line.remove(pos.col - 1);
            pos.col -= 1;
            return Removal::Byte;
        }
        if pos.row == 0 {
            return Removal::None;
        }
        let prev = pos.row - 1;
        let join_col = self.lines[prev].len();
        if self.join_with_next(prev) {
            pos.row = prev;
            pos.col = join_col;
            Removal::Join
        } else {
            Removal::None
        }
    }

    /// Delete-key semantics: remove the byte at `pos`, or join the next line onto
    /// the current one when `pos` sits at end of line.
    pub fn delete_byte_at(&mut self, pos: &mut Position) -> Removal {
        let Some(line) = self.lines.get_mut(pos.row) else {
            return Removal::None;
        };
        if pos.col < line.len() {
            line.remove(pos.col);
            return Removal::Byte;
        }
        pos.col = line.len();
        if self.join_with_next(pos.row) {
            Removal::Join
        } else {
            Removal::None
        }
    }

    /// Append line `row + 1` onto line `row` and close the gap it leaves.
    ///
    /// Refuses (returns `false`) when there is no next line or the joined content
    /// would exceed `line_len - 1` bytes.
    pub fn join_with_next(&mut self, row: usize) -> bool {
        if row + 1 >= self.lines.len() {
            return false;
        }
        let combined = self.lines[row].len() + self.lines[row + 1].len();
        if combined > self.limits.max_line_bytes() {
            trace!(target: "store", row, combined, "join_refused");
            return false;
        }
        let next = std::mem::take(&mut self.lines[row + 1]);
        if self.lines[row].try_reserve(next.len()).is_err() {
            self.lines[row + 1] = next;
            return false;
        }
        self.lines[row].extend_from_slice(&next);
        self.close_gap(row + 1, 1);
        true
    }

    fn build_line(&self, text: &[u8]) -> Result<(Vec<u8>, bool), StoreError> {
        let max = self.limits.max_line_bytes();
        let keep = text.len().min(max);
        let mut owned = Vec::new();
        owned
            .try_reserve_exact(keep)
            .map_err(|_| StoreError::AllocationFailure)?;
        owned.extend_from_slice(&text[..keep]);
        Ok((owned, keep < text.len()))
    }
}
