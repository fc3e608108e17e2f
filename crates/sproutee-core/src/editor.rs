//! Launching editors on a newly created worktree.
//!
//! Editor launch is fire-and-forget: the child is spawned detached and
//! never waited on. Failures here are advisory; the CLI reports them as
//! warnings without failing the surrounding operation.

use std::path::Path;
use std::process::Command;

use thiserror::Error;

/// Editors Sproutee knows how to launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Editor {
    /// Cursor (`cursor` CLI).
    Cursor,
    /// Visual Studio Code (`code` CLI).
    VsCode,
    /// Xcode (`xed`, macOS only).
    Xcode,
    /// Android Studio (per-platform launcher).
    AndroidStudio,
}

impl Editor {
    /// Human-readable editor name for progress messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Cursor => "Cursor",
            Self::VsCode => "VS Code",
            Self::Xcode => "Xcode",
            Self::AndroidStudio => "Android Studio",
        }
    }
}

/// Errors from resolving or launching an editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The editor does not exist on this operating system.
    #[error("{editor} is not supported on this platform")]
    Unsupported {
        /// Editor display name.
        editor: &'static str,
    },

    /// The launcher binary was not found on `PATH`.
    #[error("could not find '{binary}' on PATH: {source}")]
    NotFound {
        /// Binary that was searched for.
        binary: &'static str,
        /// Lookup failure from `which`.
        source: which::Error,
    },

    /// The launcher was found but could not be spawned.
    #[error("failed to launch {editor}: {source}")]
    Spawn {
        /// Editor display name.
        editor: &'static str,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Open `path` in `editor`, detached.
pub fn open(path: &Path, editor: Editor) -> Result<(), EditorError> {
    let mut command = launcher_command(editor)?;
    command.arg(path);

    tracing::debug!(editor = editor.display_name(), path = %path.display(), "launching editor");
    command.spawn().map_err(|source| EditorError::Spawn {
        editor: editor.display_name(),
        source,
    })?;
    Ok(())
}

/// Build the platform-appropriate launcher command, without the target path.
fn launcher_command(editor: Editor) -> Result<Command, EditorError> {
    match editor {
        Editor::Cursor => resolve("cursor"),
        Editor::VsCode => resolve("code"),
        Editor::Xcode => {
            if cfg!(target_os = "macos") {
                resolve("xed")
            } else {
                Err(EditorError::Unsupported {
                    editor: editor.display_name(),
                })
            }
        }
        Editor::AndroidStudio => {
            if cfg!(target_os = "macos") {
                // `open -a` resolves the app bundle; no PATH lookup needed.
                let mut command = Command::new("open");
                command.args(["-a", "Android Studio"]);
                Ok(command)
            } else if cfg!(target_os = "linux") {
                resolve("studio.sh")
            } else if cfg!(target_os = "windows") {
                resolve("studio")
            } else {
                Err(EditorError::Unsupported {
                    editor: editor.display_name(),
                })
            }
        }
    }
}

/// Locate `binary` on `PATH` and wrap it in a [`Command`].
fn resolve(binary: &'static str) -> Result<Command, EditorError> {
    let resolved =
        which::which(binary).map_err(|source| EditorError::NotFound { binary, source })?;
    Ok(Command::new(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(Editor::Cursor.display_name(), "Cursor");
        assert_eq!(Editor::VsCode.display_name(), "VS Code");
        assert_eq!(Editor::Xcode.display_name(), "Xcode");
        assert_eq!(Editor::AndroidStudio.display_name(), "Android Studio");
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn xcode_is_macos_only() {
        let err = launcher_command(Editor::Xcode).unwrap_err();
        assert!(matches!(err, EditorError::Unsupported { .. }));
    }
}
