//! Sproutee - Git worktree management CLI.
//!
//! Sproutee automates worktree creation and copies configured files into
//! each new worktree, so per-branch scratch state (`.env` files, local
//! compose overrides) follows you between branches.
//!
//! The CLI surface lives here; all behavior is in [`sproutee_core`].

pub mod cmd;
pub mod ui;

use clap::{Parser, Subcommand};

/// Long help text, shown by `--help`.
const LONG_ABOUT: &str = "\
Sproutee is a CLI tool that automates worktree creation and
copies specified files to new worktrees based on configuration.

It helps manage multiple branches efficiently by creating worktrees
in the .git/worktree/ directory and automatically copying configured files.";

/// Top-level CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "sproutee")]
#[command(author, version)]
#[command(about = "Sproutee - A CLI tool for managing Git worktrees efficiently")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run; a bare `sproutee` prints a short banner.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new worktree with file copying
    Create {
        /// Worktree name; used as both the directory prefix and the branch
        name: String,
        /// Automatically open the created worktree in Cursor
        #[arg(long)]
        cursor: bool,
        /// Automatically open the created worktree in VS Code
        #[arg(long)]
        vscode: bool,
        /// Automatically open the created worktree in Xcode (macOS only)
        #[arg(long)]
        xcode: bool,
        /// Automatically open the created worktree in Android Studio
        #[arg(long)]
        android_studio: bool,
        /// Directory to open in the editor (absolute, or relative to the worktree)
        #[arg(long)]
        dir: Option<String>,
    },
    /// List existing worktrees
    List,
    /// Clean up worktrees
    Clean {
        /// Show what would be deleted without actually deleting
        #[arg(long)]
        dry_run: bool,
        /// Force deletion without confirmation for worktrees with uncommitted changes
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// Configuration management commands
    Config {
        /// Config subcommand
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

/// `sproutee config` subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Create a default sproutee.json in the current directory
    Init,
    /// Show the current configuration
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn long_help_names_the_tool() {
        // The packaging smoke test greps `--help` output for "Sproutee".
        assert!(LONG_ABOUT.contains("Sproutee"));
    }

    #[test]
    fn create_parses_editor_flags() {
        let cli = Cli::try_parse_from([
            "sproutee",
            "create",
            "feature-x",
            "--vscode",
            "--dir",
            "services/api",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Create {
                name,
                vscode,
                cursor,
                dir,
                ..
            }) => {
                assert_eq!(name, "feature-x");
                assert!(vscode);
                assert!(!cursor);
                assert_eq!(dir.as_deref(), Some("services/api"));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn bare_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["sproutee"]).unwrap();
        assert!(cli.command.is_none());
    }
}
