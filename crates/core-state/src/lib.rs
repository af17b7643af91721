//! Editing session state shared by the line-command REPL and the visual editor.
//!
//! `EditorState` owns the document (`LineStore`), the current file name, the
//! dirty flag and the LastRange memory. Cursor and viewport are presentation
//! concerns and live in `core-model::View`.
//!
//! LastRange:
//! - Updated by every command that defines a natural range (list, insert,
//!   delete, edit, replace, search, open).
//! - Never read back as an implicit default range. It is kept inspectable
//!   (`last_range()`) and every update is traced at `debug` on target `repl`.
//! - Initial value is `(1, 0)`; `b == 0` means "unset".
//!
//! Ephemeral status:
//! - A single optional message surfaced by the visual status line (for example
//!   the outcome of a save). Dispatch clears it before handling the next key so
//!   it never outlives one keystroke.

use core_text::{Limits, LineStore};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Most recent range touched by a line command (1-based, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastRange {
    pub a: usize,
    pub b: usize,
}

impl Default for LastRange {
    fn default() -> Self {
        Self { a: 1, b: 0 }
    }
}

impl LastRange {
    /// True until some command records a range.
    pub fn is_unset(&self) -> bool {
        self.b == 0
    }
}

/// Top-level editor state container (single document).
#[derive(Debug, Clone)]
pub struct EditorState {
    document: LineStore,
    pub file_name: Option<PathBuf>,
    pub dirty: bool,
    pub ephemeral_status: Option<String>,
    last_range: LastRange,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(LineStore::new())
    }
}

impl EditorState {
    /// Create a new state around an existing document.
    pub fn new(document: LineStore) -> Self {
        Self {
            document,
            file_name: None,
            dirty: false,
            ephemeral_status: None,
            last_range: LastRange::default(),
        }
    }

    /// Empty document with explicit limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self::new(LineStore::with_limits(limits))
    }

    pub fn document(&self) -> &LineStore {
        &self.document
    }

    /// Mutable access to the document. Marks the state dirty.
    pub fn document_mut(&mut self) -> &mut LineStore {
        self.dirty = true;
        &mut self.document
    }

    /// Mutable access that leaves the dirty flag alone (loads, synthesized rows).
    pub fn document_mut_untracked(&mut self) -> &mut LineStore {
        &mut self.document
    }

    pub fn line_count(&self) -> usize {
        self.document.line_count()
    }

    pub fn limits(&self) -> Limits {
        self.document.limits()
    }

    pub fn last_range(&self) -> LastRange {
        self.last_range
    }

    /// Remember the range a command just operated on.
    pub fn record_range(&mut self, a: usize, b: usize) {
        self.last_range = LastRange { a, b };
        debug!(target: "repl", a, b, "last_range");
    }

    /// Adopt `path` as the current file name.
    pub fn set_file_name(&mut self, path: impl AsRef<Path>) {
        self.file_name = Some(path.as_ref().to_path_buf());
    }

    /// Display label for the current file: its path or `(none)`.
    pub fn file_label(&self) -> String {
        self.file_name
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    }

    pub fn set_ephemeral<S: Into<String>>(&mut self, msg: S) {
        self.ephemeral_status = Some(msg.into());
    }

    /// Drop the ephemeral message; returns true when one was present.
    pub fn clear_ephemeral(&mut self) -> bool {
        self.ephemeral_status.take().is_some()
    }
}
