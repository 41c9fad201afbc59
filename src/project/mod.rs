//! Project lifecycle.
//!
//! A project is a root directory holding the shared store and one directory
//! per worktree:
//!
//! - [`init`] converts a plain repository in place
//! - [`clone`] creates a project from a remote
//! - [`Project::checkout`] switches to or creates a worktree
//! - [`Project::remove`] removes a worktree and its branch
//! - [`Project::sync`] prunes worktrees whose remote branch is gone
//!
//! Every listing is a fresh query; nothing is cached between calls.

use std::path::{Path, PathBuf};

use crate::git::{GitError, Repository};
use crate::path::{canonicalize, find_project_root, is_within};

mod checkout;
pub mod clone;
pub mod init;
pub mod linkage;
mod remove;
mod sync;

pub use checkout::{CheckoutOutcome, CheckoutRequest};
pub use remove::{RemoveOptions, RemoveOutcome};
pub use sync::{SyncOptions, SyncReport};

/// Head branch assumed when the store's HEAD can't be resolved.
pub const FALLBACK_DEFAULT_BRANCH: &str = "main";

/// Fetch refspec that tracks every remote branch.
pub const FETCH_REFSPEC: &str = "+refs/heads/*:refs/remotes/origin/*";

/// A live worktree of the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeEntry {
    /// Name of the worktree directory under the root
    pub directory_name: String,
    /// Raw branch name; `None` when detached
    pub branch_name: Option<String>,
    /// Checked out to the store's default branch
    pub is_head: bool,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    repo: Repository,
}

impl Project {
    /// Find the project containing `start`.
    pub fn discover(start: &Path) -> anyhow::Result<Self> {
        let start = canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
        find_project_root(&start)
            .map(Self::at)
            .ok_or_else(|| GitError::NotAProject { path: start }.into())
    }

    /// Bind to a known project root.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            repo: Repository::at(&root),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Repository bound at the root, operating on the shared store.
    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// The store's default branch: its symbolic HEAD, if that branch exists.
    pub fn head_branch(&self) -> anyhow::Result<Option<String>> {
        match self.repo.symbolic_head()? {
            Some(branch) if self.repo.local_branch_exists(&branch)? => Ok(Some(branch)),
            _ => Ok(None),
        }
    }

    /// Every live worktree, in git's listing order.
    pub fn worktrees(&self) -> anyhow::Result<Vec<WorktreeEntry>> {
        let head = self.head_branch()?;
        let entries = self
            .repo
            .list_worktrees()?
            .into_iter()
            .filter_map(|wt| {
                let directory_name = wt.path.file_name()?.to_string_lossy().into_owned();
                let is_head = head.is_some() && wt.branch == head;
                Some(WorktreeEntry {
                    directory_name,
                    branch_name: wt.branch,
                    is_head,
                    path: wt.path,
                })
            })
            .collect();
        Ok(entries)
    }

    pub fn head_worktree(&self) -> anyhow::Result<Option<WorktreeEntry>> {
        Ok(self.worktrees()?.into_iter().find(|wt| wt.is_head))
    }

    /// Where to send a caller whose directory is about to disappear: the
    /// head worktree, unless it is the one going away, else the root.
    fn relocation_target(&self, leaving: &[&Path]) -> anyhow::Result<PathBuf> {
        Ok(self
            .head_worktree()?
            .map(|wt| wt.path)
            .filter(|head| !leaving.iter().any(|gone| is_within(head, gone)))
            .unwrap_or_else(|| self.root.clone()))
    }

    /// Move the process out of a directory that is about to be removed.
    ///
    /// Subprocesses inherit the working directory, and git can't run from a
    /// directory that no longer exists.
    fn leave_directory(&self) -> anyhow::Result<()> {
        log::debug!("Changing directory to {}", self.root.display());
        std::env::set_current_dir(&self.root).map_err(|e| {
            GitError::step(
                format!("Failed to change directory to {}", self.root.display()),
                e,
            )
            .into()
        })
    }
}
