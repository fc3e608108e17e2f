//! Clean command (worktree garbage collection)
//!
//! Analyzes every non-root worktree for uncommitted changes, then lets the
//! user pick which to delete. Dirty worktrees need a per-item confirmation
//! unless `--force` is given.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use crossterm::style::Stylize;

use sproutee_core::worktree::{Manager, Status, WorktreeInfo};

use crate::ui::Output;

/// What the user picked at the selection prompt.
#[derive(Debug, PartialEq, Eq)]
enum Selection {
    Cancel,
    All,
    CleanOnly,
    Indices(Vec<usize>),
}

/// Parse the selection prompt answer. Unparseable index fragments are
/// dropped rather than rejected.
fn parse_selection(input: &str) -> Selection {
    match input.trim() {
        "cancel" => Selection::Cancel,
        "all" => Selection::All,
        "clean" => Selection::CleanOnly,
        other => Selection::Indices(
            other
                .split(',')
                .filter_map(|part| part.trim().parse().ok())
                .collect(),
        ),
    }
}

/// A worktree with its change analysis and 1-based display index.
struct Analysis {
    info: WorktreeInfo,
    status: Status,
    index: usize,
}

/// Interactively remove unused worktrees, with safety checks for
/// uncommitted changes.
pub fn clean(dry_run: bool, force: bool) -> Result<()> {
    let output = Output::new();
    let manager = Manager::discover()?;
    let worktrees = manager.list()?;

    // The main worktree (repository root) is never cleanable.
    let cleanable: Vec<WorktreeInfo> = worktrees
        .into_iter()
        .filter(|wt| wt.path != manager.repo_root)
        .collect();

    if cleanable.is_empty() {
        output.info("No additional worktrees found to clean.");
        return Ok(());
    }

    output.info(&format!(
        "Found {} worktree(s) to analyze:",
        cleanable.len()
    ));
    println!();

    let mut analyses = Vec::new();
    for (i, wt) in cleanable.into_iter().enumerate() {
        println!("Checking {}. {}...", i + 1, display_name(&wt.path));

        let status = match manager.status(&wt.path) {
            Ok(status) => status,
            Err(err) => {
                output.warning(&format!("Error checking status: {err}"));
                continue;
            }
        };

        println!("   {}", status.summary());
        if !status.is_clean() && !force {
            if status.has_staged_changes || status.has_unstaged_changes {
                println!("   Changed files: {}", status.changed_files.join(", "));
            }
            if status.has_untracked_files {
                println!("   Untracked files: {}", status.untracked_files.join(", "));
            }
        }
        println!();

        analyses.push(Analysis {
            info: wt,
            status,
            index: i + 1,
        });
    }

    if analyses.is_empty() {
        output.error("No worktrees could be analyzed.");
        return Ok(());
    }

    if dry_run {
        println!("Dry run - no worktrees will be deleted:");
        for analysis in &analyses {
            let verdict = if analysis.status.is_clean() || force {
                "would delete"
            } else {
                "would require confirmation"
            };
            println!(
                "   {}. {} - {verdict}",
                analysis.index,
                display_name(&analysis.info.path)
            );
        }
        return Ok(());
    }

    println!("Select worktrees to delete:");
    println!("   - Enter numbers separated by commas (e.g., 1,3,5)");
    println!("   - Enter 'clean' to delete only clean worktrees");
    println!("   - Enter 'all' to delete all worktrees");
    println!("   - Enter 'cancel' to abort");
    if !force {
        println!("   Worktrees with uncommitted changes will require confirmation");
    }
    println!();
    print!("Your choice: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    let selected: Vec<usize> = match parse_selection(&input) {
        Selection::Cancel => {
            output.info("Operation cancelled.");
            return Ok(());
        }
        Selection::All => analyses.iter().map(|a| a.index).collect(),
        Selection::CleanOnly => {
            let indices: Vec<usize> = analyses
                .iter()
                .filter(|a| a.status.is_clean())
                .map(|a| a.index)
                .collect();
            if indices.is_empty() {
                output.info("No clean worktrees found.");
                return Ok(());
            }
            indices
        }
        Selection::Indices(indices) => indices
            .into_iter()
            .filter(|i| analyses.iter().any(|a| a.index == *i))
            .collect(),
    };

    if selected.is_empty() {
        output.error("No valid worktrees selected.");
        return Ok(());
    }

    println!();
    println!("Removing {} worktree(s):", selected.len());

    for index in selected {
        let Some(analysis) = analyses.iter().find(|a| a.index == index) else {
            continue;
        };

        println!();
        println!("Processing: {}", display_name(&analysis.info.path));

        if !analysis.status.is_clean() && !force {
            println!(
                "{} This worktree has uncommitted changes!",
                "Warning:".bold().yellow()
            );
            println!("   {}", analysis.status.summary());
            print!("   Continue with deletion? (y/N): ");
            std::io::stdout().flush()?;

            let mut confirm = String::new();
            std::io::stdin().read_line(&mut confirm)?;
            if !confirm.trim().eq_ignore_ascii_case("y") {
                println!("   Skipped.");
                continue;
            }
        }

        let removal = if force || !analysis.status.is_clean() {
            manager.force_remove(&analysis.info.path)
        } else {
            manager.remove(&analysis.info.path)
        };

        match removal {
            Ok(()) => output.success(&format!("Deleted: {}", display_name(&analysis.info.path))),
            Err(err) => output.error(&format!("Failed: {err}")),
        }
    }

    Ok(())
}

/// Short display name for a worktree path (its final component).
fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
