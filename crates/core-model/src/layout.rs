//! Screen geometry for the visual editor.
//!
//! Invariants:
//! * The last row is reserved for the status line; text rows are `height - 1`.
//! * Coordinates are terminal cells with origin (0,0) at the top-left.

/// Default geometry of the historical text screen.
pub const DEFAULT_COLUMNS: u16 = 80;
pub const DEFAULT_ROWS: u16 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS, DEFAULT_ROWS)
    }
}

impl Layout {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Rows available for document text (everything above the status row).
    pub fn text_rows(&self) -> usize {
        self.height.saturating_sub(1) as usize
    }

    /// Screen row holding the status line.
    pub fn status_row(&self) -> u16 {
        self.height.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reserves_status_row() {
        let l = Layout::default();
        assert_eq!(l.text_rows(), 23);
        assert_eq!(l.status_row(), 23);
    }

    #[test]
    fn degenerate_height() {
        let l = Layout::new(10, 0);
        assert_eq!(l.text_rows(), 0);
        assert_eq!(l.status_row(), 0);
    }
}
