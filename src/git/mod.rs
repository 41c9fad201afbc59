//! Git gateway.
//!
//! Every git invocation goes through [`Repository::run_command`], which
//! returns trimmed stdout on success and a [`GitError::CommandFailed`]
//! carrying git's merged, trimmed output otherwise. Nothing is cached: each
//! query reads live repository state.

use std::path::PathBuf;

mod error;
mod parse;
mod repository;

pub use error::{GitError, is_git_error};
pub use repository::{BranchSource, REMOTE, Repository};

/// One entry of `git worktree list --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeInfo {
    pub path: PathBuf,
    pub head: String,
    /// Branch name without `refs/heads/`; `None` when detached
    pub branch: Option<String>,
    pub bare: bool,
    pub detached: bool,
    /// Reason git gives when the worktree directory is gone
    pub prunable: Option<String>,
}
