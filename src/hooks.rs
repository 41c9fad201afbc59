//! Post-creation setup hook.
//!
//! After a worktree is created, grove hands it to an external setup tool
//! (`mise`). The protocol:
//!
//! 1. Tool not installed: skip, with a warning.
//! 2. Trust propagation (`grove.trust`, default on): if the worktree the user
//!    came from is trusted by the tool, trust the new one too. A failure to
//!    apply trust fails the hook.
//! 3. Setup task (`grove.setupTask`, default `setup`, empty disables): run it
//!    in the new worktree. A task the tool reports as undefined is a skip;
//!    any other failure fails the hook, and the caller rolls the worktree back.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::git::Repository;
use crate::shell_exec::Cmd;
use crate::styling::warn;

/// Executable looked up on `PATH`.
pub const HOOK_TOOL: &str = "mise";

/// Overrides the tool path. An empty value means "not installed".
pub const HOOK_TOOL_ENV: &str = "GROVE_HOOK_TOOL";

/// Marker the tool prints for a trusted directory.
const TRUSTED_MARKER: &str = ": trusted";

/// Phrases the tool uses when a task does not exist.
const UNDEFINED_TASK_MARKERS: [&str; 2] = ["no task", "task not found"];

/// Lifecycle events that can trigger the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    PostCreate,
    PostRemove,
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookEvent::PostCreate => write!(f, "post-create"),
            HookEvent::PostRemove => write!(f, "post-remove"),
        }
    }
}

/// Everything the hook needs to know about one creation.
#[derive(Debug, Clone)]
pub struct HookContext {
    pub root: PathBuf,
    pub worktree_dir: PathBuf,
    pub branch: String,
    /// Worktree the user invoked grove from, if any
    pub source_worktree: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    Ok,
    Skip(String),
    Fail(String),
}

/// Runs the setup tool, or skips when it is unavailable.
#[derive(Debug, Clone, Default)]
pub struct HookRunner {
    tool: Option<PathBuf>,
}

impl HookRunner {
    /// Find the tool: `GROVE_HOOK_TOOL` first, then `mise` on `PATH`.
    pub fn detect() -> Self {
        Self::from_override(std::env::var_os(HOOK_TOOL_ENV))
    }

    fn from_override(value: Option<OsString>) -> Self {
        match value {
            Some(value) if value.is_empty() => Self::disabled(),
            Some(value) => Self::with_tool(PathBuf::from(value)),
            None => Self {
                tool: which::which(HOOK_TOOL).ok(),
            },
        }
    }

    pub fn with_tool(tool: impl Into<PathBuf>) -> Self {
        Self {
            tool: Some(tool.into()),
        }
    }

    /// A runner that behaves as if the tool were not installed.
    pub fn disabled() -> Self {
        Self { tool: None }
    }

    pub fn tool(&self) -> Option<&Path> {
        self.tool.as_deref()
    }

    pub fn run(&self, event: HookEvent, context: &HookContext) -> HookOutcome {
        match event {
            HookEvent::PostCreate => self.post_create(context),
            HookEvent::PostRemove => HookOutcome::Ok,
        }
    }

    fn post_create(&self, context: &HookContext) -> HookOutcome {
        let Some(tool) = self.tool.as_deref() else {
            let reason = format!("{HOOK_TOOL} is not installed; skipping setup");
            warn(&reason);
            return HookOutcome::Skip(reason);
        };

        let settings = match Settings::load(&Repository::at(&context.root)) {
            Ok(settings) => settings,
            Err(e) => return HookOutcome::Fail(format!("Failed to read settings: {e:#}")),
        };

        if settings.trust
            && let Some(source) = context.source_worktree.as_deref()
            && is_trusted(tool, source)
        {
            log::info!("Trusting {}", context.worktree_dir.display());
            let cmd = Cmd::new(tool)
                .arg("trust")
                .arg(&context.worktree_dir)
                .current_dir(&context.worktree_dir);
            match cmd.run() {
                Ok(output) if output.success => {}
                Ok(output) => {
                    return HookOutcome::Fail(format!(
                        "Failed to trust {}: {}",
                        context.worktree_dir.display(),
                        output.combined()
                    ));
                }
                Err(e) => return HookOutcome::Fail(format!("{e:#}")),
            }
        }

        let Some(task) = settings.setup_task else {
            return HookOutcome::Ok;
        };

        log::info!("Running {HOOK_TOOL} task {task} for {}", context.branch);
        let cmd = Cmd::new(tool)
            .args(["run", task.as_str()])
            .current_dir(&context.worktree_dir);
        match cmd.run() {
            Ok(output) if output.success => HookOutcome::Ok,
            Ok(output) if is_undefined_task(&output.combined()) => {
                let reason = format!("Task '{task}' is not defined; skipping setup");
                warn(&reason);
                HookOutcome::Skip(reason)
            }
            Ok(output) => HookOutcome::Fail(format!("Task '{task}' failed: {}", output.combined())),
            Err(e) => HookOutcome::Fail(format!("{e:#}")),
        }
    }
}

/// Ask the tool whether `dir` is trusted. Any failure counts as untrusted.
fn is_trusted(tool: &Path, dir: &Path) -> bool {
    match Cmd::new(tool).args(["trust", "--show"]).current_dir(dir).run() {
        Ok(output) if output.success => output.stdout.contains(TRUSTED_MARKER),
        Ok(output) => {
            log::debug!("Trust query failed: {}", output.combined());
            false
        }
        Err(e) => {
            log::debug!("Trust query failed: {e:#}");
            false
        }
    }
}

fn is_undefined_task(output: &str) -> bool {
    let lower = output.to_lowercase();
    UNDEFINED_TASK_MARKERS.iter().any(|m| lower.contains(m))
}
