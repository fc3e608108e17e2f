//! List command

use anyhow::Result;

use sproutee_core::worktree::Manager;

/// List all worktrees known to git.
pub fn list() -> Result<()> {
    let manager = Manager::discover()?;
    let worktrees = manager.list()?;

    if worktrees.is_empty() {
        println!("No worktrees found.");
        return Ok(());
    }

    println!("Found {} worktree(s):", worktrees.len());
    for (i, wt) in worktrees.iter().enumerate() {
        let mut line = format!("  {}. {}", i + 1, wt.path.display());
        if let Some(branch) = &wt.branch {
            line.push_str(&format!(" (branch: {branch})"));
        }
        if let Some(commit) = &wt.commit {
            let short = commit.get(..8).unwrap_or(commit);
            line.push_str(&format!(" [{short}]"));
        }
        println!("{line}");
    }

    Ok(())
}
