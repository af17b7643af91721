//! Help overlay text shown by F1.

const HELP: &[&str] = &[
    "lined - full screen mode",
    "",
    "  Navigation",
    "    Arrows        move (Left/Right wrap across lines)",
    "    Home / End    start / end of line",
    "    PgUp / PgDn   move one page",
    "",
    "  Editing",
    "    Type          insert characters",
    "    Tab           insert spaces",
    "    Enter         split line",
    "    Backspace     delete before cursor (joins at column 1)",
    "    Delete        delete at cursor (joins at end of line)",
    "",
    "  File",
    "    F2            save to the current file",
    "    Esc / F10     back to line mode",
    "",
    "  Press any key to continue...",
];

pub fn help_lines() -> &'static [&'static str] {
    HELP
}
