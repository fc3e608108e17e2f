//! Create command

use std::path::{Path, PathBuf};

use anyhow::Result;

use sproutee_core::config;
use sproutee_core::copyset::{self, CopyReport};
use sproutee_core::editor::{self, Editor};
use sproutee_core::worktree::Manager;

use crate::ui::Output;

/// Editor and target-directory options for `create`.
#[derive(Debug, Default)]
pub struct CreateOptions {
    /// Open the worktree in Cursor.
    pub cursor: bool,
    /// Open the worktree in VS Code.
    pub vscode: bool,
    /// Open the worktree in Xcode.
    pub xcode: bool,
    /// Open the worktree in Android Studio.
    pub android_studio: bool,
    /// Directory to open instead of the worktree root.
    pub dir: Option<String>,
}

impl CreateOptions {
    /// First requested editor, in flag order.
    fn editor(&self) -> Option<Editor> {
        if self.cursor {
            Some(Editor::Cursor)
        } else if self.vscode {
            Some(Editor::VsCode)
        } else if self.xcode {
            Some(Editor::Xcode)
        } else if self.android_studio {
            Some(Editor::AndroidStudio)
        } else {
            None
        }
    }
}

/// Create a worktree, copy configured files into it, and optionally open it
/// in an editor.
pub fn create(name: &str, options: &CreateOptions) -> Result<()> {
    let output = Output::new();
    let branch = name;

    let manager = Manager::discover()?;

    output.info(&format!(
        "Creating worktree '{name}' with branch '{branch}'..."
    ));
    let worktree_path = manager.create(name, branch)?;
    output.success(&format!(
        "Worktree created successfully at: {}",
        worktree_path.display()
    ));

    output.section("Copying configured files");
    match config::discover() {
        Ok((_, cfg)) => {
            let report = copyset::copy_from_config(&manager.repo_root, &worktree_path, &cfg);
            print_copy_summary(&output, &report);
        }
        // A missing config is not fatal; the worktree already exists.
        Err(err) => output.warning(&format!("Failed to copy files: {err}")),
    }

    if let Some(editor) = options.editor() {
        let target = resolve_editor_target(&output, &worktree_path, options.dir.as_deref());
        output.section(&format!("Opening {}", editor.display_name()));
        if options.dir.is_some() {
            output.info(&format!("Target directory: {}", target.display()));
        }
        match editor::open(&target, editor) {
            Ok(()) => output.success(&format!("{} opened successfully", editor.display_name())),
            Err(err) => output.warning(&format!(
                "Failed to open {}: {err}",
                editor.display_name()
            )),
        }
    }

    Ok(())
}

/// Resolve the directory to open in the editor.
///
/// Relative paths resolve against the worktree; a missing target falls back
/// to the worktree root with a warning.
fn resolve_editor_target(output: &Output, worktree_path: &Path, dir: Option<&str>) -> PathBuf {
    let Some(dir) = dir else {
        return worktree_path.to_path_buf();
    };

    let target = if Path::new(dir).is_absolute() {
        PathBuf::from(dir)
    } else {
        worktree_path.join(dir)
    };

    if target.exists() {
        target
    } else {
        output.warning(&format!(
            "Directory '{}' does not exist, using worktree root instead",
            target.display()
        ));
        worktree_path.to_path_buf()
    }
}

/// Print the outcome of the copy pass, mirroring the copy report structure.
fn print_copy_summary(output: &Output, report: &CopyReport) {
    if report.total() == 0 {
        output.info("No files configured for copying.");
        return;
    }

    output.info(&format!("Total files: {}", report.total()));
    output.info(&format!("Successful: {}", report.succeeded()));

    if report.failed() > 0 {
        output.info(&format!("Failed: {}", report.failed()));
        for result in report.failures() {
            if let Err(err) = &result.outcome {
                output.warning(&format!("{}: {err}", result.path));
            }
        }
    }

    for result in report.successes() {
        output.info(&format!("  • {}", result.path));
    }
}
