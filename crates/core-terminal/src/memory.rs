use crate::surface::{Attr, Surface, display_byte};
use anyhow::Result;

/// Operation counts recorded by [`MemorySurface`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceCounters {
    pub clears: u64,
    pub writes: u64,
    pub cells_written: u64,
    pub cursor_moves: u64,
    pub flushes: u64,
}

/// In-memory grid of cells used to assert render output without a terminal.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    columns: u16,
    rows: u16,
    cells: Vec<u8>,
    reverse: Vec<bool>,
    attr: Attr,
    cursor: (u16, u16),
    counters: SurfaceCounters,
}

impl MemorySurface {
    pub fn new(columns: u16, rows: u16) -> Self {
        let n = columns as usize * rows as usize;
        Self {
            columns,
            rows,
            cells: vec![b' '; n],
            reverse: vec![false; n],
            attr: Attr::Normal,
            cursor: (0, 0),
            counters: SurfaceCounters::default(),
        }
    }

    /// Row content with trailing blanks removed.
    pub fn row_text(&self, row: u16) -> String {
        if row >= self.rows {
            return String::new();
        }
        let start = row as usize * self.columns as usize;
        let line = &self.cells[start..start + self.columns as usize];
        String::from_utf8_lossy(line).trim_end().to_string()
    }

    /// Every row, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        (0..self.rows).map(|r| self.row_text(r)).collect()
    }

    pub fn is_reverse(&self, row: u16, col: u16) -> bool {
        row < self.rows && col < self.columns && self.reverse[self.index(row, col)]
    }

    /// Hardware cursor as `(row, col)`.
    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    pub fn counters(&self) -> SurfaceCounters {
        self.counters
    }

    pub fn reset_counters(&mut self) {
        self.counters = SurfaceCounters::default();
    }

    fn index(&self, row: u16, col: u16) -> usize {
        row as usize * self.columns as usize + col as usize
    }
}

impl Surface for MemorySurface {
    fn size(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    fn clear(&mut self) -> Result<()> {
        self.cells.fill(b' ');
        self.reverse.fill(false);
        self.counters.clears += 1;
        Ok(())
    }

    fn write_at(&mut self, row: u16, col: u16, bytes: &[u8]) -> Result<()> {
        self.counters.writes += 1;
        if row >= self.rows || col >= self.columns {
            return Ok(());
        }
        let room = (self.columns - col) as usize;
        let rev = self.attr == Attr::Reverse;
        for (i, b) in bytes.iter().take(room).enumerate() {
            let idx = self.index(row, col) + i;
            self.cells[idx] = display_byte(*b);
            self.reverse[idx] = rev;
            self.counters.cells_written += 1;
        }
        Ok(())
    }

    fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        self.cursor = (row, col);
        self.counters.cursor_moves += 1;
        Ok(())
    }

    fn set_attr(&mut self, attr: Attr) -> Result<()> {
        self.attr = attr;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.counters.flushes += 1;
        Ok(())
    }
}
