//! Git worktree lifecycle, driven by the `git` CLI.
//!
//! All operations shell out to `git` with the repository root as the working
//! directory and parse its porcelain output. Worktrees created by Sproutee
//! live under [`WORKTREE_DIR`] inside the repository, named
//! `<name>_<timestamp>` so repeated creates for the same branch never
//! collide.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Repository-relative directory holding Sproutee-managed worktrees.
pub const WORKTREE_DIR: &str = ".git/worktree";

/// Errors from worktree operations.
#[derive(Debug, Error)]
pub enum WorktreeError {
    /// No `.git` directory (or gitfile) between the start directory and the
    /// filesystem root.
    #[error("not inside a Git repository")]
    NotARepository,

    /// Filesystem or process-spawn failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A git subcommand exited non-zero. `output` carries git's combined
    /// stdout and stderr for diagnosis.
    #[error("`{command}` failed: {output}")]
    Git {
        /// The git invocation that failed.
        command: String,
        /// Combined stdout + stderr from git.
        output: String,
    },
}

/// A single worktree as reported by `git worktree list --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeInfo {
    /// Absolute path of the worktree.
    pub path: PathBuf,
    /// Checked-out branch, without the `refs/heads/` prefix. `None` for a
    /// detached HEAD.
    pub branch: Option<String>,
    /// Full commit hash of HEAD.
    pub commit: Option<String>,
}

/// Uncommitted-change summary for a worktree, from `git status --porcelain`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    /// Any entry with a staged (index) change.
    pub has_staged_changes: bool,
    /// Any entry with an unstaged (working tree) change.
    pub has_unstaged_changes: bool,
    /// Any untracked file.
    pub has_untracked_files: bool,
    /// Paths with staged or unstaged changes.
    pub changed_files: Vec<String>,
    /// Untracked paths.
    pub untracked_files: Vec<String>,
}

impl Status {
    /// True when the worktree has no uncommitted or untracked changes.
    pub fn is_clean(&self) -> bool {
        !self.has_staged_changes && !self.has_unstaged_changes && !self.has_untracked_files
    }

    /// One-line human summary, e.g. `staged changes, untracked files`.
    pub fn summary(&self) -> String {
        if self.is_clean() {
            return "Clean".to_string();
        }
        let mut parts = Vec::new();
        if self.has_staged_changes {
            parts.push("staged changes");
        }
        if self.has_unstaged_changes {
            parts.push("unstaged changes");
        }
        if self.has_untracked_files {
            parts.push("untracked files");
        }
        format!("Has {}", parts.join(", "))
    }
}

/// Directory name for a new worktree: `<name>_<YYYYMMDD_HHMMSS>`.
///
/// The timestamp suffix keeps repeated creates for the same branch from
/// colliding.
pub fn worktree_dir_name(name: &str) -> String {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("{name}_{stamp}")
}

/// Walk from `start` upward looking for the repository root.
///
/// A directory is the root if it contains a `.git` directory, or a `.git`
/// gitfile (as found inside worktrees and submodules) whose contents start
/// with `gitdir: `.
pub fn find_repo_root(start: &Path) -> Result<PathBuf, WorktreeError> {
    let start = start.canonicalize()?;
    for dir in start.ancestors() {
        let git_path = dir.join(".git");
        match fs::metadata(&git_path) {
            Ok(meta) if meta.is_dir() => return Ok(dir.to_path_buf()),
            Ok(_) => {
                if let Ok(data) = fs::read_to_string(&git_path) {
                    if data.starts_with("gitdir: ") {
                        return Ok(dir.to_path_buf());
                    }
                }
            }
            Err(_) => {}
        }
    }
    Err(WorktreeError::NotARepository)
}

/// Handle to the enclosing repository; all git invocations run from its
/// root.
#[derive(Debug, Clone)]
pub struct Manager {
    /// Absolute path of the main worktree (repository root).
    pub repo_root: PathBuf,
}

impl Manager {
    /// Locate the enclosing repository from the current directory.
    pub fn discover() -> Result<Self, WorktreeError> {
        let cwd = std::env::current_dir()?;
        let repo_root = find_repo_root(&cwd)?;
        Ok(Self { repo_root })
    }

    /// Base directory for Sproutee-managed worktrees.
    pub fn base_path(&self) -> PathBuf {
        self.repo_root.join(WORKTREE_DIR)
    }

    /// Create a worktree for `branch` under [`WORKTREE_DIR`].
    ///
    /// The branch must already exist; git's own error is surfaced when it
    /// does not. Returns the path of the new worktree.
    pub fn create(&self, name: &str, branch: &str) -> Result<PathBuf, WorktreeError> {
        let base = self.base_path();
        fs::create_dir_all(&base)?;

        let path = base.join(worktree_dir_name(name));
        tracing::debug!(path = %path.display(), branch, "creating worktree");
        run_git(
            &self.repo_root,
            &[
                OsStr::new("worktree"),
                OsStr::new("add"),
                path.as_os_str(),
                OsStr::new(branch),
            ],
        )?;
        Ok(path)
    }

    /// List all worktrees known to git (including the main one).
    pub fn list(&self) -> Result<Vec<WorktreeInfo>, WorktreeError> {
        let output = run_git(
            &self.repo_root,
            &[
                OsStr::new("worktree"),
                OsStr::new("list"),
                OsStr::new("--porcelain"),
            ],
        )?;
        Ok(parse_worktree_list(&output))
    }

    /// Inspect a worktree for uncommitted changes.
    pub fn status(&self, worktree_path: &Path) -> Result<Status, WorktreeError> {
        let output = run_git(
            worktree_path,
            &[OsStr::new("status"), OsStr::new("--porcelain")],
        )?;
        Ok(parse_status(&output))
    }

    /// Remove a clean worktree via `git worktree remove`.
    pub fn remove(&self, worktree_path: &Path) -> Result<(), WorktreeError> {
        run_git(
            &self.repo_root,
            &[
                OsStr::new("worktree"),
                OsStr::new("remove"),
                worktree_path.as_os_str(),
            ],
        )?;
        Ok(())
    }

    /// Remove a worktree even if it has uncommitted changes.
    pub fn force_remove(&self, worktree_path: &Path) -> Result<(), WorktreeError> {
        run_git(
            &self.repo_root,
            &[
                OsStr::new("worktree"),
                OsStr::new("remove"),
                OsStr::new("--force"),
                worktree_path.as_os_str(),
            ],
        )?;
        Ok(())
    }
}

/// Run `git <args>` in `dir`, returning stdout on success and the
/// combined output in the error otherwise.
fn run_git(dir: &Path, args: &[&OsStr]) -> Result<String, WorktreeError> {
    let output = Command::new("git").args(args).current_dir(dir).output()?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let command = format!(
            "git {}",
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );
        return Err(WorktreeError::Git {
            command,
            output: combined.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `git worktree list --porcelain` output.
///
/// Records are blank-line separated `key value` blocks; unknown keys are
/// ignored.
fn parse_worktree_list(output: &str) -> Vec<WorktreeInfo> {
    let mut worktrees = Vec::new();
    let mut current: Option<WorktreeInfo> = None;

    for line in output.lines() {
        if line.is_empty() {
            if let Some(info) = current.take() {
                worktrees.push(info);
            }
            continue;
        }

        let Some((key, value)) = line.split_once(' ') else {
            // Bare flags like `bare` or `detached` carry no value.
            continue;
        };

        match key {
            "worktree" => {
                if let Some(info) = current.take() {
                    worktrees.push(info);
                }
                current = Some(WorktreeInfo {
                    path: PathBuf::from(value),
                    branch: None,
                    commit: None,
                });
            }
            "branch" => {
                if let Some(info) = current.as_mut() {
                    let branch = value.strip_prefix("refs/heads/").unwrap_or(value);
                    info.branch = Some(branch.to_string());
                }
            }
            "HEAD" => {
                if let Some(info) = current.as_mut() {
                    info.commit = Some(value.to_string());
                }
            }
            _ => {}
        }
    }

    if let Some(info) = current {
        worktrees.push(info);
    }

    worktrees
}

/// Classify `git status --porcelain` entries into staged / unstaged /
/// untracked buckets.
fn parse_status(output: &str) -> Status {
    let mut status = Status::default();

    for line in output.lines() {
        let bytes = line.as_bytes();
        if bytes.len() < 4 {
            continue;
        }
        let (index, worktree) = (bytes[0], bytes[1]);
        let file = line[3..].to_string();

        if index == b'?' && worktree == b'?' {
            status.has_untracked_files = true;
            status.untracked_files.push(file);
            continue;
        }

        if index != b' ' {
            status.has_staged_changes = true;
        }
        if worktree != b' ' {
            status.has_unstaged_changes = true;
        }
        status.changed_files.push(file);
    }

    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_repo_root_with_git_directory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let root = find_repo_root(&nested).unwrap();
        assert_eq!(root, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn find_repo_root_with_gitfile() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".git"),
            "gitdir: /somewhere/.git/worktrees/x\n",
        )
        .unwrap();

        let root = find_repo_root(dir.path()).unwrap();
        assert_eq!(root, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn find_repo_root_outside_repository() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            find_repo_root(dir.path()),
            Err(WorktreeError::NotARepository)
        ));
    }

    #[test]
    fn worktree_dir_name_embeds_timestamp() {
        let name = worktree_dir_name("feature-123");
        assert!(name.starts_with("feature-123_"));
        // `<name>_YYYYMMDD_HHMMSS`
        assert_eq!(name.len(), "feature-123_".len() + 15);
    }

    #[test]
    fn base_path_is_under_git_dir() {
        let manager = Manager {
            repo_root: PathBuf::from("/repo"),
        };
        assert_eq!(manager.base_path(), PathBuf::from("/repo/.git/worktree"));
    }

    #[test]
    fn parse_worktree_list_multiple_records() {
        let output = "worktree /path/to/main\n\
                      HEAD abc123def456abc123def456abc123def456abc1\n\
                      branch refs/heads/main\n\
                      \n\
                      worktree /path/to/feature\n\
                      HEAD def456abc123def456abc123def456abc123def4\n\
                      branch refs/heads/feature\n";

        let worktrees = parse_worktree_list(output);
        assert_eq!(worktrees.len(), 2);
        assert_eq!(worktrees[0].path, PathBuf::from("/path/to/main"));
        assert_eq!(worktrees[0].branch.as_deref(), Some("main"));
        assert_eq!(
            worktrees[0].commit.as_deref(),
            Some("abc123def456abc123def456abc123def456abc1")
        );
        assert_eq!(worktrees[1].branch.as_deref(), Some("feature"));
    }

    #[test]
    fn parse_worktree_list_detached_head() {
        let output = "worktree /path/to/detached\n\
                      HEAD abc123def456abc123def456abc123def456abc1\n\
                      detached\n";

        let worktrees = parse_worktree_list(output);
        assert_eq!(worktrees.len(), 1);
        assert!(worktrees[0].branch.is_none());
        assert!(worktrees[0].commit.is_some());
    }

    #[test]
    fn parse_worktree_list_empty() {
        assert!(parse_worktree_list("").is_empty());
        assert!(parse_worktree_list("\n\n").is_empty());
    }

    #[test]
    fn parse_status_classifies_entries() {
        let output = "M  staged.txt\n M unstaged.txt\n?? new.txt\n";
        let status = parse_status(output);

        assert!(status.has_staged_changes);
        assert!(status.has_unstaged_changes);
        assert!(status.has_untracked_files);
        assert_eq!(status.untracked_files, vec!["new.txt"]);
        assert_eq!(status.changed_files.len(), 2);
        assert!(!status.is_clean());
    }

    #[test]
    fn parse_status_clean() {
        let status = parse_status("");
        assert!(status.is_clean());
        assert_eq!(status.summary(), "Clean");
    }

    #[test]
    fn status_summary_names_every_category() {
        let status = Status {
            has_staged_changes: true,
            has_unstaged_changes: true,
            has_untracked_files: true,
            ..Status::default()
        };
        let summary = status.summary();
        assert!(summary.contains("staged changes"));
        assert!(summary.contains("unstaged changes"));
        assert!(summary.contains("untracked files"));
    }
}
