//! Grove error types and formatting
//!
//! **`GitError`** is a typed enum for domain errors that can be pattern-matched
//! and tested. Use `.into()` to convert to `anyhow::Error` while preserving the
//! type for pattern matching and styled display in main.rs.

use std::path::PathBuf;

use color_print::cformat;

use crate::path::format_path_for_display;
use crate::styling::{error_message, hint_message};

/// Domain errors for project and worktree operations.
///
/// # Usage
///
/// ```ignore
/// // Return a typed error (main.rs handles styled display via downcast)
/// return Err(GitError::AlreadyExists { path }.into());
///
/// // Pattern match on errors
/// if let Some(GitError::Ambiguous { candidates, .. }) = err.downcast_ref() {
///     println!("{} candidates", candidates.len());
/// }
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum GitError {
    // -------------------------------------------------------------------------
    // Preconditions
    // -------------------------------------------------------------------------
    /// No `.store` in the directory or any of its ancestors
    #[error("not inside a grove project: {}", path.display())]
    NotAProject { path: PathBuf },

    /// No plain `.git` directory to convert
    #[error("not a git repository: {}", path.display())]
    NotARepository { path: PathBuf },

    /// `init` ran inside an existing project, below its root
    #[error("already initialized: {} belongs to the project at {}", path.display(), root.display())]
    AlreadyInitialized { path: PathBuf, root: PathBuf },

    /// Destination directory or worktree already exists
    #[error("already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// Two branch names sanitize to the same directory
    #[error("directory '{directory}' for branch '{branch}' is already used by branch '{occupant}'")]
    DirectoryCollision {
        branch: String,
        directory: String,
        occupant: String,
    },

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------
    #[error("'{token}' is ambiguous: {}", candidates.join(", "))]
    Ambiguous {
        token: String,
        candidates: Vec<String>,
    },

    #[error("no worktree matches '{token}'")]
    NoMatch {
        token: String,
        /// Copy-pasteable command to offer instead
        hint: Option<String>,
    },

    // -------------------------------------------------------------------------
    // Guards
    // -------------------------------------------------------------------------
    #[error("refusing to remove the head worktree '{directory}'")]
    HeadWorktreeProtected { directory: String },

    #[error("aborted")]
    Aborted,

    #[error("cannot prompt for confirmation in a non-interactive environment")]
    NotInteractive,

    // -------------------------------------------------------------------------
    // Step failures
    // -------------------------------------------------------------------------
    /// A named step of a multi-step operation failed
    #[error("{step}: {output}")]
    StepFailed { step: String, output: String },

    /// A git invocation exited non-zero
    #[error("{command} failed: {output}")]
    CommandFailed { command: String, output: String },

    #[error("setup hook failed: {message}")]
    HookFailed { message: String },

    #[error("{message}")]
    ParseError { message: String },

    #[error("{message}")]
    Other { message: String },
}

impl GitError {
    /// Wrap a lower-level failure with the name of the step that failed.
    ///
    /// Gateway failures contribute git's own output verbatim; anything else
    /// contributes its error chain.
    pub fn step(step: impl Into<String>, err: impl Into<anyhow::Error>) -> Self {
        let err = err.into();
        let output = match err.downcast_ref::<GitError>() {
            Some(GitError::CommandFailed { output, .. }) => output.clone(),
            _ => format!("{err:#}"),
        };
        GitError::StepFailed {
            step: step.into(),
            output,
        }
    }

    /// Format the error for terminal display, with emoji, colors and hints.
    pub fn styled(&self) -> String {
        match self {
            GitError::NotAProject { path } => format!(
                "{}\n{}",
                error_message(cformat!(
                    "Not inside a grove project: <bold>{}</>",
                    format_path_for_display(path)
                )),
                hint_message(cformat!(
                    "Run <bright-black>grove init</> in a git repository, or <bright-black>grove clone URL</>"
                ))
            ),

            GitError::NotARepository { path } => error_message(cformat!(
                "Not a git repository: <bold>{}</>",
                format_path_for_display(path)
            )),

            GitError::AlreadyInitialized { path, root } => format!(
                "{}\n{}",
                error_message(cformat!(
                    "Already initialized: <bold>{}</> is inside a project",
                    format_path_for_display(path)
                )),
                hint_message(format!(
                    "Run grove init from the project root {} to repair it",
                    format_path_for_display(root)
                ))
            ),

            GitError::AlreadyExists { path } => error_message(cformat!(
                "Already exists: <bold>{}</>",
                format_path_for_display(path)
            )),

            GitError::DirectoryCollision {
                branch,
                directory,
                occupant,
            } => error_message(cformat!(
                "Directory <bold>{directory}</> for branch <bold>{branch}</> is already used by branch <bold>{occupant}</>"
            )),

            GitError::Ambiguous { token, candidates } => {
                let mut msg = error_message(cformat!("<bold>{token}</> is ambiguous:"));
                for candidate in candidates {
                    msg.push_str(&format!("\n   {candidate}"));
                }
                msg
            }

            GitError::NoMatch { token, hint } => {
                let msg = error_message(cformat!("No worktree matches <bold>{token}</>"));
                match hint {
                    Some(cmd) => format!(
                        "{msg}\n{}",
                        hint_message(cformat!("To create it, run <bright-black>{cmd}</>"))
                    ),
                    None => msg,
                }
            }

            GitError::HeadWorktreeProtected { directory } => format!(
                "{}\n{}",
                error_message(cformat!(
                    "Refusing to remove the head worktree <bold>{directory}</>"
                )),
                hint_message(cformat!("Use <bright-black>--force</> to remove it anyway"))
            ),

            GitError::Aborted => error_message("Aborted"),

            GitError::NotInteractive => format!(
                "{}\n{}",
                error_message("Cannot prompt for confirmation in a non-interactive environment"),
                hint_message(cformat!("Use <bright-black>--yes</> to skip the prompt"))
            ),

            GitError::StepFailed { step, output } => format_error_block(step, output),

            GitError::CommandFailed { command, output } => {
                format_error_block(&format!("{command} failed"), output)
            }

            GitError::HookFailed { message } => {
                format_error_block("Setup hook failed, worktree rolled back", message)
            }

            GitError::ParseError { message } | GitError::Other { message } => {
                error_message(message)
            }
        }
    }
}

/// Check if an error is a specific GitError variant
pub fn is_git_error<F>(err: &anyhow::Error, predicate: F) -> bool
where
    F: FnOnce(&GitError) -> bool,
{
    err.downcast_ref::<GitError>().is_some_and(predicate)
}

/// Header line followed by the tool's output, indented.
fn format_error_block(header: &str, output: &str) -> String {
    let trimmed = output.trim();
    let header = error_message(header);
    if trimmed.is_empty() {
        return header;
    }
    let body: Vec<String> = trimmed.lines().map(|line| format!("   {line}")).collect();
    format!("{header}\n{}", body.join("\n"))
}
