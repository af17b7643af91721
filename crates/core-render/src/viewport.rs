//! Viewport: the visible vertical window into the document.
//!
//! * `first_line` is the index of the topmost document line rendered.
//! * `height` is the number of screen rows available for document text (the
//!   status row is excluded).

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub first_line: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(first_line: usize, height: usize) -> Self {
        Self { first_line, height }
    }

    /// One past the last visible document row.
    pub fn end(&self) -> usize {
        self.first_line + self.height
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.first_line && row < self.end()
    }

    /// Screen row for a visible document row.
    pub fn screen_row(&self, row: usize) -> Option<u16> {
        self.contains(row)
            .then(|| (row - self.first_line).min(u16::MAX as usize) as u16)
    }

    /// Intersection of `rows` with the visible rows (possibly empty).
    pub fn clip(&self, rows: Range<usize>) -> Range<usize> {
        let start = rows.start.max(self.first_line);
        let end = rows.end.min(self.end());
        if start >= end { start..start } else { start..end }
    }
}
