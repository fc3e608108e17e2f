//! Config commands

use anyhow::{Context, Result};

use sproutee_core::config;

/// Create a default `sproutee.json` in the current directory.
pub fn init() -> Result<()> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let path = cwd.join(config::CONFIG_FILE_NAME);

    config::create_default_file(&path)?;

    println!("Configuration file created: {}", path.display());
    println!("You can now customize the file to specify which files to copy to new worktrees.");
    Ok(())
}

/// Display the active configuration.
pub fn list() -> Result<()> {
    let (path, cfg) = config::discover()?;

    println!("Current configuration: {}", path.display());
    println!("Files to copy: {}", cfg.copy_files.len());
    for (i, file) in cfg.copy_files.iter().enumerate() {
        println!("  {}. {file}", i + 1);
    }
    Ok(())
}
