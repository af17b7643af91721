//! Dispatcher applying visual-editor `Action`s to the session model.
//!
//! Sub-modules:
//! * `motion` - cursor movement and scrolling
//! * `edit`   - byte insert/delete, split and join
//!
//! Every handler reports what it invalidated as a `RenderDelta`, which is
//! queued on the `RenderScheduler`; the caller consumes the scheduler once per
//! key. Help and exit are signalled through `DispatchResult` because they
//! change the loop's state rather than the document.

use crate::error::CommandError;
use crate::{Action, io_ops};
use core_model::EditorModel;
use core_render::{RenderDelta, RenderScheduler};

mod edit;
mod motion;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// A render delta was queued.
    pub dirty: bool,
    /// Leave the visual editor.
    pub quit: bool,
    /// Show the help overlay.
    pub help: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self::default()
    }
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }
}

/// Apply `action` to `model`, queueing render invalidation on `scheduler`.
pub fn dispatch(
    action: Action,
    model: &mut EditorModel,
    scheduler: &mut RenderScheduler,
    tab_width: usize,
) -> DispatchResult {
    let text_rows = model.layout().text_rows();
    let (state, view) = model.split_state_and_view();
    let delta = match action {
        Action::Motion(kind) => motion::handle_motion(kind, state.document(), view, text_rows),
        Action::Edit(kind) => edit::handle_edit(kind, state, view, text_rows, tab_width),
        Action::Save => {
            let message = match io_ops::write_file(state, None) {
                Ok((count, _)) => format!("Saved {count} line(s)"),
                Err(CommandError::NoFileName) => "No filename".to_string(),
                Err(e) => {
                    tracing::warn!(target: "visual", error = %e, "save_failed");
                    "Write failed".to_string()
                }
            };
            state.set_ephemeral(message);
            Some(RenderDelta::StatusLine)
        }
        Action::Help => {
            return DispatchResult {
                help: true,
                ..DispatchResult::clean()
            };
        }
        Action::Exit => {
            return DispatchResult {
                quit: true,
                ..DispatchResult::clean()
            };
        }
    };
    match delta {
        Some(delta) => {
            scheduler.mark(delta);
            DispatchResult::dirty()
        }
        None => DispatchResult::clean(),
    }
}
