//! Per-project settings.
//!
//! Settings live in the shared store's git config under the `grove.` prefix,
//! never in a separate file:
//!
//! ```text
//! [grove]
//!     trust = true        # propagate hook-tool trust into new worktrees
//!     setupTask = setup   # task run after creating a worktree; "" disables
//! ```
//!
//! Both are read fresh on every call.

use crate::git::Repository;

/// Config key for trust propagation.
pub const TRUST_KEY: &str = "grove.trust";

/// Config key for the setup task name.
pub const SETUP_TASK_KEY: &str = "grove.setupTask";

/// Task run when `grove.setupTask` is unset.
pub const DEFAULT_SETUP_TASK: &str = "setup";

/// Settings read from a project's git config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Propagate trust from the source worktree to a new one
    pub trust: bool,
    /// Task to run in a new worktree; `None` when explicitly disabled
    pub setup_task: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trust: true,
            setup_task: Some(DEFAULT_SETUP_TASK.to_string()),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults for unset keys.
    ///
    /// An invalid boolean for `grove.trust` is an error rather than a silent
    /// default.
    pub fn load(repo: &Repository) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let trust = repo.get_config_bool(TRUST_KEY)?.unwrap_or(defaults.trust);
        let setup_task = match repo.get_config(SETUP_TASK_KEY)? {
            None => defaults.setup_task,
            Some(task) if task.trim().is_empty() => None,
            Some(task) => Some(task.trim().to_string()),
        };
        let settings = Self { trust, setup_task };
        log::debug!("Loaded settings: {settings:?}");
        Ok(settings)
    }

    pub fn set_trust(repo: &Repository, trust: bool) -> anyhow::Result<()> {
        repo.set_config(TRUST_KEY, if trust { "true" } else { "false" })
    }

    /// Set the setup task. An empty name disables it.
    pub fn set_setup_task(repo: &Repository, task: &str) -> anyhow::Result<()> {
        repo.set_config(SETUP_TASK_KEY, task)
    }
}
