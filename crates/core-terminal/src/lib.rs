//! Terminal session and drawing surface.
//!
//! `ScreenSession` switches the terminal into raw mode on the alternate screen
//! for the duration of one visual session and switches it back when ended or
//! dropped, so the line REPL always resumes on the normal screen. `Surface` is
//! the drawing capability set the render engine targets (clear, write a cell
//! range, move the cursor, set an attribute). `CrosstermSurface` queues
//! crossterm commands onto any writer and emits them on `flush`;
//! `MemorySurface` records cells and operation counts for tests.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    style::{Attribute, SetAttribute},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::stdout;
use tracing::{debug, warn};

mod memory;
mod surface;
pub use memory::{MemorySurface, SurfaceCounters};
pub use surface::{Attr, CrosstermSurface, Surface, display_byte};

/// Raw mode plus alternate screen, restored on `end` or drop.
///
/// Restoration also resets display attributes, so a session that dies while
/// painting the reverse-video status line does not leak it into the REPL.
#[derive(Debug)]
pub struct ScreenSession {
    active: bool,
}

impl ScreenSession {
    /// Enter the alternate screen titled `title`.
    ///
    /// If anything after enabling raw mode fails, the partially entered state is
    /// rolled back before the error is returned.
    pub fn begin(title: &str) -> Result<Self> {
        enable_raw_mode()?;
        let session = Self { active: true };
        execute!(
            stdout(),
            EnterAlternateScreen,
            SetTitle(title),
            Clear(ClearType::All),
            Show
        )?;
        debug!(target: "runtime", title, "terminal_entered");
        Ok(session)
    }

    /// Leave the alternate screen now and report any failure.
    pub fn end(mut self) -> Result<()> {
        self.active = false;
        restore()
    }
}

impl Drop for ScreenSession {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = restore() {
                warn!(target: "runtime", error = %e, "terminal_restore_failed");
            }
        }
    }
}

fn restore() -> Result<()> {
    execute!(
        stdout(),
        SetAttribute(Attribute::Reset),
        LeaveAlternateScreen,
        Show
    )?;
    disable_raw_mode()?;
    debug!(target: "runtime", "terminal_left");
    Ok(())
}
