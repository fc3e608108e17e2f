//! Copying configured files into freshly created worktrees.
//!
//! Copies are best-effort: every configured path is attempted and the
//! outcome recorded in a [`CopyReport`], so one missing `.env` never aborts
//! worktree creation. Relative directory structure is preserved on the
//! target side.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Config;

/// Errors from copying a single file.
#[derive(Debug, Error)]
pub enum CopyError {
    /// The configured source path does not exist in the repository.
    #[error("source file does not exist: {}", .0.display())]
    MissingSource(PathBuf),

    /// Filesystem failure while copying.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of copying one configured path.
#[derive(Debug)]
pub struct CopyResult {
    /// The configured repository-relative path.
    pub path: String,
    /// Resolved source path.
    pub source: PathBuf,
    /// Resolved target path.
    pub target: PathBuf,
    /// Per-file outcome.
    pub outcome: Result<(), CopyError>,
}

/// Aggregated outcomes for a whole copy pass.
#[derive(Debug, Default)]
pub struct CopyReport {
    /// One entry per configured path, in configuration order.
    pub results: Vec<CopyResult>,
}

impl CopyReport {
    /// Total number of attempted copies.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of successful copies.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_ok()).count()
    }

    /// Number of failed copies.
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_err()).count()
    }

    /// Iterate over successful results.
    pub fn successes(&self) -> impl Iterator<Item = &CopyResult> {
        self.results.iter().filter(|r| r.outcome.is_ok())
    }

    /// Iterate over failed results.
    pub fn failures(&self) -> impl Iterator<Item = &CopyResult> {
        self.results.iter().filter(|r| r.outcome.is_err())
    }
}

/// Copy a single file, creating target parent directories and preserving
/// the source permission bits.
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), CopyError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(())
}

/// Copy `relative_path` from `src_root` to the same relative location under
/// `target_root`.
pub fn copy_with_structure(
    src_root: &Path,
    target_root: &Path,
    relative_path: &str,
) -> Result<(), CopyError> {
    let src = src_root.join(relative_path);
    if !src.exists() {
        return Err(CopyError::MissingSource(src));
    }
    copy_file(&src, &target_root.join(relative_path))
}

/// Attempt every path in `config.copy_files`, recording per-file outcomes.
pub fn copy_from_config(src_root: &Path, target_root: &Path, config: &Config) -> CopyReport {
    let mut report = CopyReport::default();

    for path in &config.copy_files {
        let outcome = copy_with_structure(src_root, target_root, path);
        match &outcome {
            Ok(()) => tracing::debug!(path, "copied file to worktree"),
            Err(err) => tracing::debug!(path, %err, "failed to copy file"),
        }
        report.results.push(CopyResult {
            path: path.clone(),
            source: src_root.join(path),
            target: target_root.join(path),
            outcome,
        });
    }

    report
}
