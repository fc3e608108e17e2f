//! Unified console output for commands.
//!
//! Sproutee's commands are sequential and short-lived, so output is printed
//! directly rather than routed through a background renderer. Quietness is
//! process-global, set once from the CLI flags before any command runs.

use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::style::Stylize;

/// Process-global quiet flag, set from `--quiet` before dispatch.
static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppress non-essential output for the rest of the process.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Handle for styled console output.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    quiet: bool,
}

impl Output {
    /// Create a new output handle, snapshotting the global quiet flag.
    pub fn new() -> Self {
        Self {
            quiet: QUIET.load(Ordering::Relaxed),
        }
    }

    /// Print an informational message.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{msg}");
        }
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{} {msg}", "✓".bold().green());
        }
    }

    /// Print a warning to stderr. Warnings are never suppressed.
    pub fn warning(&self, msg: &str) {
        eprintln!("{} {msg}", "Warning:".bold().yellow());
    }

    /// Print an error to stderr. Errors are never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {msg}", "Error:".bold().red());
    }

    /// Print a visual section header for an operation phase.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!();
            println!("{}", title.bold());
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
