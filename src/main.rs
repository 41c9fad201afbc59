use std::path::Path;
use std::process;

use clap::Parser;
use grove::git::GitError;
use grove::styling::{eprintln, error_message};

mod cli;
mod commands;

use cli::{Cli, Commands, ConfigAction, ConfigSetting};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        match e.downcast_ref::<GitError>() {
            Some(git_error) => eprintln!("{}", git_error.styled()),
            None => eprintln!("{}", error_message(format!("{e:#}"))),
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(dir) = &cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            GitError::step(format!("Failed to change directory to {}", dir.display()), e)
        })?;
    }
    let cwd = std::env::current_dir()
        .map_err(|e| GitError::step("Failed to read the current directory", e))?;
    dispatch(cli.command, &cwd)
}

fn dispatch(command: Commands, cwd: &Path) -> anyhow::Result<()> {
    match command {
        Commands::Init => commands::handle_init(cwd),
        Commands::Clone { url, directory } => {
            commands::handle_clone(&url, directory.as_deref(), cwd)
        }
        Commands::Checkout { name, create } => commands::handle_checkout(&name, create, cwd),
        Commands::Rm { name, force, yes } => commands::handle_remove(&name, force, yes, cwd),
        Commands::Sync { dry_run } => commands::handle_sync(dry_run, cwd),
        Commands::List => commands::handle_list(cwd),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::handle_config_show(cwd),
            ConfigAction::Set { setting } => match setting {
                ConfigSetting::Trust { value } => commands::handle_config_set_trust(value, cwd),
                ConfigSetting::SetupTask { name } => {
                    commands::handle_config_set_setup_task(&name, cwd)
                }
            },
        },
    }
}

/// Warnings already reach the user as styled messages, so the logger only
/// adds errors by default. `-v` adds info, `-vv` debug; `RUST_LOG` overrides.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp(None);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}
