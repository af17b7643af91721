//! RenderEngine: executes a scheduler `Decision` against a `Surface`.
//!
//! Every path reads the document and view from `EditorModel`; nothing is cached
//! between frames, so any path is safe after any other. Text rows past the end
//! of the document show `~`. Lines wider than the screen are clipped; the
//! hardware cursor is clamped to the last column.

use crate::overlay::help_lines;
use crate::partial_metrics::{RenderPathMetrics, RenderPathMetricsSnapshot};
use crate::scheduler::{Decision, RenderDelta};
use crate::status::{StatusContext, status_bytes};
use crate::viewport::Viewport;
use anyhow::Result;
use core_model::EditorModel;
use core_terminal::{Attr, Surface};
use std::ops::Range;

const EMPTY_ROW_MARKER: &[u8] = b"~";

#[derive(Debug, Default)]
pub struct RenderEngine {
    metrics: RenderPathMetrics,
    // Instrumentation so tests can assert repaint scope.
    last_repaint_lines: Vec<usize>,
    last_repaint_kind: Option<&'static str>,
}

/// Viewport derived from the model's view and layout.
pub fn viewport_of(model: &EditorModel) -> Viewport {
    Viewport::new(model.view().top_line, model.layout().text_rows())
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metrics_snapshot(&self) -> RenderPathMetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn last_repaint_lines(&self) -> &[usize] {
        &self.last_repaint_lines
    }

    pub fn last_repaint_kind(&self) -> Option<&'static str> {
        self.last_repaint_kind
    }

    /// Execute the effective strategy of `decision`.
    pub fn render<S: Surface>(
        &mut self,
        decision: &Decision,
        model: &EditorModel,
        surface: &mut S,
    ) -> Result<()> {
        match &decision.effective {
            RenderDelta::Full => self.render_full(model, surface),
            RenderDelta::Lines(r) => self.render_lines(r.clone(), model, surface),
            RenderDelta::Cell { row, col } => self.render_cell(*row, *col, model, surface),
            RenderDelta::StatusLine => self.render_status(model, surface),
            RenderDelta::CursorOnly => self.render_cursor_only(model, surface),
        }
    }

    pub fn render_full<S: Surface>(&mut self, model: &EditorModel, surface: &mut S) -> Result<()> {
        let vp = viewport_of(model);
        surface.set_attr(Attr::Normal)?;
        surface.clear()?;
        let doc = model.state().document();
        for screen_row in 0..vp.height {
            let row = vp.first_line + screen_row;
            let bytes = doc.line(row).unwrap_or(EMPTY_ROW_MARKER);
            if !bytes.is_empty() {
                surface.write_at(screen_row as u16, 0, bytes)?;
            }
        }
        self.paint_status(model, surface)?;
        self.place_cursor(model, surface)?;
        surface.flush()?;
        RenderPathMetrics::bump(&self.metrics.full_frames, 1);
        self.note("full", vp.first_line..vp.end());
        tracing::trace!(target: "render.engine", first = vp.first_line, rows = vp.height, "render_full");
        Ok(())
    }

    /// Repaint document rows `rows` (clipped to the viewport), padding each to
    /// the full width so stale bytes disappear.
    pub fn render_lines<S: Surface>(
        &mut self,
        rows: Range<usize>,
        model: &EditorModel,
        surface: &mut S,
    ) -> Result<()> {
        let vp = viewport_of(model);
        let rows = vp.clip(rows);
        let width = model.layout().width as usize;
        let doc = model.state().document();
        let mut buf = Vec::with_capacity(width);
        for row in rows.clone() {
            let Some(screen_row) = vp.screen_row(row) else {
                continue;
            };
            buf.clear();
            buf.extend_from_slice(doc.line(row).unwrap_or(EMPTY_ROW_MARKER));
            buf.resize(width, b' ');
            surface.write_at(screen_row, 0, &buf)?;
        }
        self.paint_status(model, surface)?;
        self.place_cursor(model, surface)?;
        surface.flush()?;
        RenderPathMetrics::bump(&self.metrics.lines_frames, 1);
        RenderPathMetrics::bump(&self.metrics.lines_repainted, rows.len() as u64);
        tracing::trace!(target: "render.engine", start = rows.start, end = rows.end, "render_lines");
        self.note("lines", rows);
        Ok(())
    }

    /// Write the single byte at document `(row, col)`.
    pub fn render_cell<S: Surface>(
        &mut self,
        row: usize,
        col: usize,
        model: &EditorModel,
        surface: &mut S,
    ) -> Result<()> {
        let vp = viewport_of(model);
        let width = model.layout().width as usize;
        let byte = model
            .state()
            .document()
            .line(row)
            .and_then(|l| l.get(col))
            .copied();
        if let (Some(screen_row), Some(b)) = (vp.screen_row(row), byte) {
            if col < width {
                surface.write_at(screen_row, col as u16, &[b])?;
            }
        }
        self.paint_status(model, surface)?;
        self.place_cursor(model, surface)?;
        surface.flush()?;
        RenderPathMetrics::bump(&self.metrics.cell_frames, 1);
        self.note("cell", row..row + 1);
        Ok(())
    }

    pub fn render_status<S: Surface>(&mut self, model: &EditorModel, surface: &mut S) -> Result<()> {
        self.paint_status(model, surface)?;
        self.place_cursor(model, surface)?;
        surface.flush()?;
        RenderPathMetrics::bump(&self.metrics.status_frames, 1);
        self.note("status", 0..0);
        Ok(())
    }

    pub fn render_cursor_only<S: Surface>(
        &mut self,
        model: &EditorModel,
        surface: &mut S,
    ) -> Result<()> {
        self.place_cursor(model, surface)?;
        surface.flush()?;
        RenderPathMetrics::bump(&self.metrics.cursor_only_frames, 1);
        self.note("cursor_only", 0..0);
        Ok(())
    }

    /// Replace the screen with the static help text.
    pub fn render_help<S: Surface>(&mut self, model: &EditorModel, surface: &mut S) -> Result<()> {
        let height = model.layout().height as usize;
        surface.set_attr(Attr::Normal)?;
        surface.clear()?;
        for (i, line) in help_lines().iter().take(height).enumerate() {
            surface.write_at(i as u16, 0, line.as_bytes())?;
        }
        surface.move_cursor(model.layout().status_row(), 0)?;
        surface.flush()?;
        RenderPathMetrics::bump(&self.metrics.help_frames, 1);
        self.note("help", 0..0);
        Ok(())
    }

    fn paint_status<S: Surface>(&self, model: &EditorModel, surface: &mut S) -> Result<()> {
        let state = model.state();
        let view = model.view();
        let layout = model.layout();
        let ctx = StatusContext {
            row: view.cursor.row,
            line_count: state.line_count(),
            col: view.cursor.col,
            file_name: state.file_name.as_deref(),
            message: state.ephemeral_status.as_deref(),
        };
        let bytes = status_bytes(&ctx, layout.width as usize);
        surface.set_attr(Attr::Reverse)?;
        surface.write_at(layout.status_row(), 0, &bytes)?;
        surface.set_attr(Attr::Normal)?;
        Ok(())
    }

    fn place_cursor<S: Surface>(&self, model: &EditorModel, surface: &mut S) -> Result<()> {
        let (row, col) = physical_cursor(model);
        surface.move_cursor(row, col)
    }

    fn note(&mut self, kind: &'static str, rows: Range<usize>) {
        self.last_repaint_kind = Some(kind);
        self.last_repaint_lines.clear();
        self.last_repaint_lines.extend(rows);
    }
}

/// Screen cell of the cursor: viewport relative row, column clamped to the
/// last screen column.
pub fn physical_cursor(model: &EditorModel) -> (u16, u16) {
    let view = model.view();
    let layout = model.layout();
    let max_row = layout.text_rows().saturating_sub(1);
    let row = view.screen_row().min(max_row) as u16;
    let max_col = layout.width.saturating_sub(1) as usize;
    let col = view.cursor.col.min(max_col) as u16;
    (row, col)
}
