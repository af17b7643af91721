use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::io::Write;

/// Display attribute applied to subsequent writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attr {
    #[default]
    Normal,
    Reverse,
}

/// Drawing capability set used by the render engine.
///
/// Invariants:
/// * Positions are absolute `(row, col)` cells with origin (0,0) top-left.
/// * `write_at` writes bytes left to right starting at the given cell and clips
///   at the right edge; it never wraps and leaves the hardware cursor where the
///   caller last placed it with `move_cursor`.
/// * Every byte occupies exactly one cell. Bytes outside printable ASCII are
///   drawn as [`display_byte`] renders them.
/// * Nothing is guaranteed visible before `flush`.
pub trait Surface {
    /// `(columns, rows)`.
    fn size(&self) -> (u16, u16);
    fn clear(&mut self) -> Result<()>;
    fn write_at(&mut self, row: u16, col: u16, bytes: &[u8]) -> Result<()>;
    fn move_cursor(&mut self, row: u16, col: u16) -> Result<()>;
    fn set_attr(&mut self, attr: Attr) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> (u16, u16) {
        (**self).size()
    }
    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
    fn write_at(&mut self, row: u16, col: u16, bytes: &[u8]) -> Result<()> {
        (**self).write_at(row, col, bytes)
    }
    fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        (**self).move_cursor(row, col)
    }
    fn set_attr(&mut self, attr: Attr) -> Result<()> {
        (**self).set_attr(attr)
    }
    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Cell glyph for a document byte. Control bytes and anything above 0x7e
/// become `?` so one byte always fills one cell and nothing reaches the
/// terminal as a live control sequence.
pub fn display_byte(b: u8) -> u8 {
    if (0x20..=0x7e).contains(&b) {
        b
    } else {
        b'?'
    }
}

/// Crossterm-backed surface. Commands are queued on `out` and emitted in order
/// by `flush`; ordering is preserved and nothing is flushed mid-frame.
pub struct CrosstermSurface<W: Write> {
    out: W,
    columns: u16,
    rows: u16,
    cursor: (u16, u16),
}

impl<W: Write> CrosstermSurface<W> {
    pub fn new(out: W, columns: u16, rows: u16) -> Self {
        Self {
            out,
            columns,
            rows,
            cursor: (0, 0),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for CrosstermSurface<W> {
    fn size(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        Ok(())
    }

    fn write_at(&mut self, row: u16, col: u16, bytes: &[u8]) -> Result<()> {
        if row >= self.rows || col >= self.columns {
            return Ok(());
        }
        let room = (self.columns - col) as usize;
        let visible = &bytes[..bytes.len().min(room)];
        if visible.is_empty() {
            return Ok(());
        }
        let text: String = visible.iter().map(|&b| display_byte(b) as char).collect();
        queue!(self.out, MoveTo(col, row), Print(text), MoveTo(self.cursor.1, self.cursor.0))?;
        Ok(())
    }

    fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        self.cursor = (row, col);
        queue!(self.out, MoveTo(col, row))?;
        Ok(())
    }

    fn set_attr(&mut self, attr: Attr) -> Result<()> {
        let a = match attr {
            Attr::Normal => Attribute::Reset,
            Attr::Reverse => Attribute::Reverse,
        };
        queue!(self.out, SetAttribute(a))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossterm_surface_queues_until_flush() {
        let mut s = CrosstermSurface::new(Vec::new(), 10, 3);
        s.set_attr(Attr::Reverse).unwrap();
        s.write_at(1, 2, b"hello world").unwrap();
        s.set_attr(Attr::Normal).unwrap();
        s.flush().unwrap();
        let out = String::from_utf8(s.into_inner()).unwrap();
        // clipped to the 8 cells right of column 2
        assert!(out.contains("hello wo"));
        assert!(!out.contains("hello wor"));
    }

    #[test]
    fn control_and_high_bytes_fill_one_cell_each() {
        let mut s = CrosstermSurface::new(Vec::new(), 80, 24);
        s.write_at(0, 0, b"a\tb\x1b[2Jc\xc3\xa9").unwrap();
        let out = s.into_inner();
        // only the MoveTo sequences carry ESC
        assert_eq!(out.iter().filter(|&&b| b == 0x1b).count(), 2);
        assert!(!out.contains(&b'\t'));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a?b?[2Jc??"));
    }

    #[test]
    fn crossterm_surface_ignores_offscreen_writes() {
        let mut s = CrosstermSurface::new(Vec::new(), 4, 2);
        s.write_at(5, 0, b"x").unwrap();
        s.write_at(0, 9, b"x").unwrap();
        assert!(s.into_inner().is_empty());
    }
}
