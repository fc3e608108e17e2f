//! Configuration file handling (`sproutee.json`).
//!
//! The configuration lists repository-relative paths that are copied into
//! every newly created worktree. Like `.gitignore`, the file is discovered by
//! walking from the current directory up to the filesystem root, so commands
//! work from anywhere inside a repository.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name searched for when discovering configuration.
pub const CONFIG_FILE_NAME: &str = "sproutee.json";

/// Errors from loading, saving, or discovering configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The config file could not be written.
    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The config file exists but is not valid. Covers malformed JSON as
    /// well as a missing or `null` `copy_files` field.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// No `sproutee.json` was found between the start directory and the
    /// filesystem root.
    #[error("configuration file '{CONFIG_FILE_NAME}' not found")]
    NotFound,

    /// `create_default_file` refuses to clobber an existing file.
    #[error("configuration file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// The current working directory could not be determined.
    #[error("failed to get current directory: {0}")]
    CurrentDir(std::io::Error),
}

/// Sproutee configuration.
///
/// `copy_files` holds repository-relative paths copied into each new
/// worktree. The field is required in the JSON (an empty array is fine,
/// `null` or a missing field is not), which keeps a half-written config from
/// silently copying nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Repository-relative paths to copy into new worktrees.
    pub copy_files: Vec<String>,
}

impl Config {
    /// Load configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data)?;
        tracing::debug!(path = %path.display(), files = config.copy_files.len(), "loaded config");
        Ok(config)
    }

    /// Write configuration to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let mut data = serde_json::to_string_pretty(self)?;
        data.push('\n');
        fs::write(path, data).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Search for `sproutee.json` from `start` upward to the filesystem root.
///
/// Returns the path of the first match.
pub fn find_config_file(start: &Path) -> Result<PathBuf, ConfigError> {
    for dir in start.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(ConfigError::NotFound)
}

/// Discover and load configuration starting from the current directory.
///
/// Returns both the path the config was found at and its contents, so
/// callers can report where settings came from.
pub fn discover() -> Result<(PathBuf, Config), ConfigError> {
    let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
    let path = find_config_file(&cwd)?;
    let config = Config::load(&path)?;
    Ok((path, config))
}

/// Create a default (empty) configuration file at `path`.
///
/// Fails if a file already exists there.
pub fn create_default_file(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    Config::default().save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_empty() {
        let config = Config::default();
        assert!(config.copy_files.is_empty());
    }

    #[test]
    fn load_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"copy_files": [".env", "docker-compose.yml"]}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.copy_files, vec![".env", "docker-compose.yml"]);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"copy_files": [".env""#).unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_rejects_null_copy_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"copy_files": null}"#).unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_rejects_missing_copy_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{}").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        assert!(matches!(Config::load(&path), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn find_config_in_parent_directory() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("subdir");
        fs::create_dir_all(&sub).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, r#"{"copy_files": []}"#).unwrap();

        let found = find_config_file(&sub).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn find_config_fails_when_absent() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            find_config_file(dir.path()),
            Err(ConfigError::NotFound)
        ));
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let config = Config {
            copy_files: vec![".env".to_string(), "docker-compose.yml".to_string()],
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn create_default_file_refuses_to_clobber() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        create_default_file(&path).unwrap();
        let config = Config::load(&path).unwrap();
        assert!(config.copy_files.is_empty());

        assert!(matches!(
            create_default_file(&path),
            Err(ConfigError::AlreadyExists(_))
        ));
    }
}
