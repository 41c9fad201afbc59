//! Worktree management operations for Repository.

use std::path::Path;

use super::{GitError, REMOTE, Repository, WorktreeInfo};
use crate::path::format_path_for_display;

/// Where the branch of a new worktree comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchSource {
    /// Create a local branch tracking `origin/<branch>`
    TrackRemote,
    /// Check out an existing local branch and set its upstream to
    /// `origin/<branch>`; a bare clone already has a local branch for every
    /// remote branch
    AdoptRemote,
    /// Check out an existing local branch
    Existing,
    /// Create a new local branch from the store's HEAD
    NewBranch,
}

impl Repository {
    /// List all worktrees, with bare entries filtered out.
    ///
    /// For a project root the bare entry is the shared store itself, so every
    /// returned entry is a worktree directory.
    pub fn list_worktrees(&self) -> anyhow::Result<Vec<WorktreeInfo>> {
        let stdout = self.run_command(&["worktree", "list", "--porcelain"])?;
        let raw_worktrees = WorktreeInfo::parse_porcelain_list(&stdout)?;
        Ok(raw_worktrees.into_iter().filter(|wt| !wt.bare).collect())
    }

    /// Add a worktree for `branch` at `path`.
    pub fn add_worktree(
        &self,
        path: &Path,
        branch: &str,
        source: BranchSource,
    ) -> anyhow::Result<()> {
        let path_str = utf8_path(path)?;
        let upstream = format!("{REMOTE}/{branch}");
        let args: Vec<&str> = match source {
            BranchSource::TrackRemote => vec![
                "worktree",
                "add",
                "--track",
                "-b",
                branch,
                path_str,
                upstream.as_str(),
            ],
            BranchSource::AdoptRemote | BranchSource::Existing => {
                vec!["worktree", "add", path_str, branch]
            }
            BranchSource::NewBranch => vec!["worktree", "add", "-b", branch, path_str],
        };
        log::debug!("Adding worktree for {branch} ({source:?})");
        self.run_command(&args)?;
        if source == BranchSource::AdoptRemote {
            self.set_upstream(branch)?;
        }
        Ok(())
    }

    /// Remove the worktree at `path`.
    ///
    /// When `force` is true, passes `--force` to `git worktree remove`,
    /// allowing removal even when the worktree has modified or untracked files.
    pub fn remove_worktree(&self, path: &Path, force: bool) -> anyhow::Result<()> {
        let path_str = utf8_path(path)?;
        let mut args = vec!["worktree", "remove"];
        if force {
            args.push("--force");
        }
        args.push(path_str);
        self.run_command(&args)?;
        Ok(())
    }

    /// Prune worktree entries whose directories no longer exist.
    ///
    /// Git tracks worktrees in `<store>/worktrees/`. If a worktree directory is
    /// deleted externally (e.g., `rm -rf`), this cleans up the entry.
    pub fn prune_worktrees(&self) -> anyhow::Result<()> {
        self.run_command(&["worktree", "prune"])?;
        Ok(())
    }
}

fn utf8_path(path: &Path) -> anyhow::Result<&str> {
    path.to_str().ok_or_else(|| {
        GitError::Other {
            message: format!(
                "Worktree path contains invalid UTF-8: {}",
                format_path_for_display(path)
            ),
        }
        .into()
    })
}
