use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "grove")]
#[command(about = "Branch-per-directory git worktrees", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Verbose logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Run as if started in <DIR>
    #[arg(short = 'C', value_name = "DIR", global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Convert the repository in the current directory into a project
    ///
    /// Moves every file into a worktree named after the current branch and
    /// turns .git into the shared .store. Running it again at the project
    /// root repairs the layout.
    Init,

    /// Clone a remote into a new project
    Clone {
        /// Remote URL or path
        url: String,

        /// Destination (default: derived from the URL)
        directory: Option<PathBuf>,
    },

    /// Switch to a worktree, creating it if requested
    ///
    /// Prints the worktree path on stdout.
    #[command(visible_aliases = ["switch", "co"])]
    Checkout {
        /// Worktree name; fuzzy matched unless creating
        name: String,

        /// Create a new worktree for branch NAME
        #[arg(short = 'c', long)]
        create: bool,
    },

    /// Remove a worktree and its branch
    #[command(visible_alias = "remove")]
    Rm {
        /// Worktree or branch name; fuzzy matched
        name: String,

        /// Remove even the head worktree, dirty worktrees and unmerged branches
        #[arg(short, long)]
        force: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Fetch and prune worktrees whose remote branch was deleted
    Sync {
        /// Show what would be removed without removing it
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// List worktrees
    #[command(visible_alias = "ls")]
    List,

    /// Show or change project settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings
    Show,

    /// Change a setting
    Set {
        #[command(subcommand)]
        setting: ConfigSetting,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigSetting {
    /// Propagate trust from the current worktree to new ones
    Trust {
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },

    /// Task run in new worktrees (empty to disable)
    SetupTask { name: String },
}
