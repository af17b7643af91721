//! Rendering for the visual editor.
//!
//! Pipeline per keystroke:
//! 1. The dispatcher marks one or more `RenderDelta`s on the `RenderScheduler`.
//! 2. `consume` merges them (`Full` > `Lines` > `Cell` > `StatusLine` >
//!    `CursorOnly`) and escalates against the current `Viewport`.
//! 3. `RenderEngine::render` executes the effective strategy on a
//!    `core_terminal::Surface`.
//!
//! Granularities map onto the three classic redraw levels: full screen, single
//! line (`Lines` / `Cell`), status only (`StatusLine`), plus a cursor-only move
//! for in-viewport navigation.

pub mod overlay;
pub mod partial_metrics;
pub mod render_engine;
pub mod scheduler;
pub mod status;
pub mod viewport;

pub use render_engine::{RenderEngine, physical_cursor, viewport_of};
pub use scheduler::{Decision, RenderDelta, RenderScheduler};
pub use viewport::Viewport;
