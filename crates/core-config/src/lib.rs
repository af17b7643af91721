//! Configuration loading and parsing.
//!
//! Parses `lined.toml` (or an override path provided by the binary). Every key
//! is optional; missing sections fall back to the historical sizes (1200 lines,
//! 256 byte line buffers, an 80x24 screen, 8 column tabs). Unknown fields are
//! ignored so the file can grow without breaking older builds.
//!
//! Values below the workable minimum are clamped by `Config::effective_*`
//! helpers, each clamp emitting an `info` event on target `config`. A file that
//! fails to parse yields defaults plus a `warn`.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{debug, info, warn};

pub const CONFIG_FILE_NAME: &str = "lined.toml";

const MIN_MAX_LINES: usize = 1;
const MIN_LINE_LEN: usize = 2;
const MIN_COLUMNS: u16 = 1;
const MIN_ROWS: u16 = 2;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    #[serde(default = "LimitsConfig::default_max_lines")]
    pub max_lines: usize,
    #[serde(default = "LimitsConfig::default_line_len")]
    pub line_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_lines: Self::default_max_lines(),
            line_len: Self::default_line_len(),
        }
    }
}

impl LimitsConfig {
    const fn default_max_lines() -> usize {
        1200
    }
    const fn default_line_len() -> usize {
        256
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    #[serde(default = "ScreenConfig::default_columns")]
    pub columns: u16,
    #[serde(default = "ScreenConfig::default_rows")] // last row is the status line
    pub rows: u16,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            columns: Self::default_columns(),
            rows: Self::default_rows(),
        }
    }
}

impl ScreenConfig {
    const fn default_columns() -> u16 {
        80
    }
    const fn default_rows() -> u16 {
        24
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct VisualConfig {
    #[serde(default = "VisualConfig::default_tab_width")]
    pub tab_width: u8,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            tab_width: Self::default_tab_width(),
        }
    }
}

impl VisualConfig {
    const fn default_tab_width() -> u8 {
        8
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub screen: ScreenConfig,
    #[serde(default)]
    pub visual: VisualConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub source: Option<PathBuf>,
    pub file: ConfigFile,
}

/// Config path following platform conventions: the working directory first,
/// then `<config_dir>/lined/lined.toml`.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("lined").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(target: "config", path = %path.display(), "config_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                source: Some(path),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

fn clamp_min<T>(key: &'static str, raw: T, min: T) -> T
where
    T: Copy + PartialOrd + std::fmt::Display,
{
    if raw < min {
        info!(target: "config", key, %raw, clamped = %min, "config_value_clamped");
        min
    } else {
        raw
    }
}

impl Config {
    /// Effective `(max_lines, line_len)` after clamping.
    pub fn effective_limits(&self) -> (usize, usize) {
        let l = &self.file.limits;
        (
            clamp_min("limits.max_lines", l.max_lines, MIN_MAX_LINES),
            clamp_min("limits.line_len", l.line_len, MIN_LINE_LEN),
        )
    }

    /// Effective `(columns, rows)` after clamping.
    pub fn effective_screen(&self) -> (u16, u16) {
        let s = &self.file.screen;
        (
            clamp_min("screen.columns", s.columns, MIN_COLUMNS),
            clamp_min("screen.rows", s.rows, MIN_ROWS),
        )
    }

    pub fn tab_width(&self) -> usize {
        self.file.visual.tab_width as usize
    }
}
