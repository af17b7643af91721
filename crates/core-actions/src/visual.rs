//! Fullscreen editor loop.
//!
//! `VisualEditor` pulls keys from a `KeySource`, turns them into `Action`s,
//! dispatches them against the model and renders whatever the scheduler
//! collected onto a `Surface`. It is generic over both seams so tests run it
//! with scripted keys and an in-memory screen.
//!
//! Phases:
//! * `Editing`: keys are translated and dispatched.
//! * `Help`: the overlay is on screen; the next key (any key) returns to
//!   `Editing` with a full repaint.
//! * `Exiting`: Esc/F10 was pressed (or the key source ran dry).
//!
//! An ephemeral status message lives for exactly one key: it is cleared before
//! the next key is handled, which repaints the status line.

use crate::dispatcher::dispatch;
use crate::key_translator::translate_key;
use crate::repl::VisualFrontEnd;
use anyhow::Result;
use core_events::KeyEvent;
use core_input::KeySource;
use core_model::EditorModel;
use core_render::{RenderDelta, RenderEngine, RenderScheduler, viewport_of};
use core_terminal::Surface;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Help,
    Exiting,
}

pub struct VisualEditor<K, S> {
    keys: K,
    surface: S,
    engine: RenderEngine,
    scheduler: RenderScheduler,
    tab_width: usize,
    phase: Phase,
}

impl<K: KeySource, S: Surface> VisualEditor<K, S> {
    pub fn new(keys: K, surface: S, tab_width: usize) -> Self {
        Self {
            keys,
            surface,
            engine: RenderEngine::new(),
            scheduler: RenderScheduler::new(),
            tab_width,
            phase: Phase::Editing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn engine(&self) -> &RenderEngine {
        &self.engine
    }

    /// Run one visual session over `model` until exit or end of input.
    pub fn run_session(&mut self, model: &mut EditorModel) -> Result<()> {
        model.enter_visual()?;
        self.phase = Phase::Editing;
        info!(
            target: "visual",
            lines = model.state().line_count(),
            width = model.layout().width,
            height = model.layout().height,
            "visual_enter"
        );
        self.scheduler.mark(RenderDelta::Full);
        self.render_pending(model)?;
        while self.phase != Phase::Exiting {
            let Some(key) = self.keys.next_key()? else {
                debug!(target: "visual", "key_source_exhausted");
                self.phase = Phase::Exiting;
                break;
            };
            self.handle_key(&key, model)?;
        }
        // the message belongs to this session only
        model.state_mut().clear_ephemeral();
        let metrics = self.engine.metrics_snapshot();
        info!(
            target: "visual",
            full = metrics.full_frames,
            lines = metrics.lines_frames,
            cell = metrics.cell_frames,
            status = metrics.status_frames,
            cursor_only = metrics.cursor_only_frames,
            dirty = model.state().dirty,
            "visual_exit"
        );
        Ok(())
    }

    /// Handle a single key in the current phase and render the result.
    pub fn handle_key(&mut self, key: &KeyEvent, model: &mut EditorModel) -> Result<()> {
        match self.phase {
            Phase::Exiting => return Ok(()),
            Phase::Help => {
                self.phase = Phase::Editing;
                self.scheduler.mark(RenderDelta::Full);
            }
            Phase::Editing => {
                if model.state_mut().clear_ephemeral() {
                    self.scheduler.mark_status();
                }
                if let Some(action) = translate_key(key) {
                    debug!(target: "visual", %key, ?action, "action");
                    let result = dispatch(action, model, &mut self.scheduler, self.tab_width);
                    if result.quit {
                        self.phase = Phase::Exiting;
                        return Ok(());
                    }
                    if result.help {
                        self.phase = Phase::Help;
                        return self.engine.render_help(model, &mut self.surface);
                    }
                }
            }
        }
        self.render_pending(model)
    }

    fn render_pending(&mut self, model: &EditorModel) -> Result<()> {
        let Some(decision) = self.scheduler.consume(&viewport_of(model)) else {
            return Ok(());
        };
        self.engine.render(&decision, model, &mut self.surface)
    }
}

impl<K: KeySource, S: Surface> VisualFrontEnd for VisualEditor<K, S> {
    fn run(&mut self, model: &mut EditorModel) -> Result<()> {
        self.run_session(model)
    }
}
