//! Sproutee - Git worktree management CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sproutee_cli::cmd::{self, create::CreateOptions};
use sproutee_cli::{Cli, Commands, ConfigCommands, ui};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    ui::set_quiet(cli.quiet);

    let Some(command) = cli.command else {
        println!("Sproutee - Git Worktree Management Tool");
        println!("Use 'sproutee --help' for more information.");
        return Ok(());
    };

    match command {
        Commands::Create {
            name,
            cursor,
            vscode,
            xcode,
            android_studio,
            dir,
        } => cmd::create::create(
            &name,
            &CreateOptions {
                cursor,
                vscode,
                xcode,
                android_studio,
                dir,
            },
        ),
        Commands::List => cmd::list::list(),
        Commands::Clean { dry_run, force } => cmd::clean::clean(dry_run, force),
        Commands::Config { command } => match command {
            ConfigCommands::Init => cmd::config::init(),
            ConfigCommands::List => cmd::config::list(),
        },
        Commands::Completions { shell } => {
            cmd::completions::completions(shell);
            Ok(())
        }
    }
}
