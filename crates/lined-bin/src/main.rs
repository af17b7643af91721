//! lined entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::{Repl, VisualEditor, VisualFrontEnd};
use core_config::{Config, load_from};
use core_input::CrosstermKeySource;
use core_model::{EditorModel, Layout};
use core_state::EditorState;
use core_terminal::{CrosstermSurface, ScreenSession};
use core_text::{Limits, LineStore};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "lined.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "lined", version, about = "Line-numbered text editor with a fullscreen mode")]
struct Args {
    /// File to load at startup. A missing file still becomes the current file name.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `lined.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

/// Crossterm-backed visual mode: raw mode and the alternate screen are held for
/// exactly one session and restored even when the session fails.
struct TerminalFrontEnd {
    tab_width: usize,
}

impl VisualFrontEnd for TerminalFrontEnd {
    fn run(&mut self, model: &mut EditorModel) -> Result<()> {
        let layout = model.layout();
        let screen = ScreenSession::begin("lined")?;
        let surface = CrosstermSurface::new(BufWriter::new(io::stdout()), layout.width, layout.height);
        let mut editor = VisualEditor::new(CrosstermKeySource::new(), surface, self.tab_width);
        let result = editor.run_session(model);
        screen.end()?;
        result
    }
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Some(guard),
        // Global subscriber already installed; dropping the guard stops the writer.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Empty model sized from the effective configuration.
fn build_model(config: &Config) -> EditorModel {
    let (max_lines, line_len) = config.effective_limits();
    let (columns, rows) = config.effective_screen();
    let store = LineStore::with_limits(Limits::new(max_lines, line_len));
    EditorModel::with_layout(EditorState::new(store), Layout::new(columns, rows))
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    let args = Args::parse();
    info!(target: "runtime", path = ?args.path, config = ?args.config, "startup");

    let config = load_from(args.config.clone())?;
    let model = build_model(&config);
    let layout = model.layout();
    info!(
        target: "runtime",
        max_lines = model.state().limits().max_lines,
        line_len = model.state().limits().line_len,
        columns = layout.width,
        rows = layout.height,
        tab_width = config.tab_width(),
        config_source = ?config.source,
        "bootstrap_complete"
    );

    let stdin = io::stdin();
    let mut repl = Repl::new(model, stdin.lock(), io::stdout())
        .with_visual(Box::new(TerminalFrontEnd {
            tab_width: config.tab_width(),
        }));
    if let Some(path) = args.path.as_deref() {
        repl.startup_load(path)?;
    }
    let outcome = repl.run();
    match &outcome {
        Ok(()) => info!(target: "runtime", dirty = repl.model().state().dirty, "shutdown"),
        Err(e) => warn!(target: "runtime", error = %e, "repl_failed"),
    }
    outcome
}
