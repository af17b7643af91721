//! Editing operations for both front-ends.
//!
//! * `range` / `repl`: the line-numbered REPL (range resolution, command
//!   parsing, line commands and the loop itself).
//! * `io_ops`: loading and saving the document.
//! * `key_translator` / `dispatcher` / `visual`: the fullscreen editor. Keys
//!   become `Action`s, the dispatcher applies them to the model and reports
//!   render invalidation to the scheduler, and `VisualEditor` runs the loop.

pub mod dispatcher;
pub mod error;
pub mod io_ops;
pub mod key_translator;
pub mod range;
pub mod repl;
pub mod visual;

pub use dispatcher::{DispatchResult, dispatch};
pub use error::{CommandError, IoOp, SubstKind};
pub use key_translator::translate_key;
pub use range::{LineRange, RangeSpec};
pub use repl::{Repl, VisualFrontEnd};
pub use visual::VisualEditor;

/// Cursor movement in the visual editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}

/// Document mutation at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Printable ASCII byte.
    InsertByte(u8),
    /// Insert `tab_width` spaces.
    Tab,
    SplitLine,
    Backspace,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    Help,
    Save,
    Exit,
}
