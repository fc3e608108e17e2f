//! Sproutee core library.
//!
//! Everything the `sproutee` binary does lives here: locating the enclosing
//! Git repository, driving `git worktree` subcommands, loading the
//! `sproutee.json` configuration, copying configured files into fresh
//! worktrees, and launching editors on the result.
//!
//! # Architecture
//!
//! - **Subprocess-driven**: all Git interaction shells out to the `git`
//!   binary and parses its porcelain output. Sproutee never touches the
//!   object store directly.
//! - **Per-module errors**: each module exposes a `thiserror` enum; the CLI
//!   collapses them into `anyhow` at the boundary.
//!
//! # Directory layout
//!
//! ```text
//! <repo>/
//! ├── .git/worktree/        # Worktrees created by Sproutee
//! │   └── <name>_<stamp>/
//! └── sproutee.json         # Files to copy into new worktrees
//! ```

pub mod config;
pub mod copyset;
pub mod editor;
pub mod worktree;
