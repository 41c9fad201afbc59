//! Switch to an existing worktree, or create one.

use std::fs;
use std::path::{Path, PathBuf};

use super::Project;
use crate::fuzzy::{self, MatchOutcome};
use crate::git::{BranchSource, GitError};
use crate::hooks::{HookContext, HookEvent, HookOutcome, HookRunner};
use crate::path::{sanitize_branch, worktree_dir_names};
use crate::styling::{suggest_command, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Fuzzy token when switching, exact branch name when creating
    pub name: String,
    /// Create a new worktree instead of switching
    pub create: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    /// Worktree to switch to
    pub path: PathBuf,
    /// Whether the worktree was created by this call
    pub created: bool,
}

impl Project {
    /// Switch to the worktree `request.name` resolves to, or create one.
    ///
    /// When switching finds nothing but `origin/<name>` exists, the worktree
    /// is created from the remote branch instead.
    pub fn checkout(
        &self,
        request: &CheckoutRequest,
        hooks: &HookRunner,
        cwd: &Path,
    ) -> anyhow::Result<CheckoutOutcome> {
        let token = request.name.as_str();
        if request.create {
            return self.create_worktree(token, hooks, cwd);
        }

        let candidates = worktree_dir_names(&self.root)
            .map_err(|e| GitError::step("Failed to list worktree directories", e))?;
        match fuzzy::resolve(token, &candidates) {
            MatchOutcome::Exact(name) | MatchOutcome::Single(name) => {
                log::debug!("{token:?} resolved to {name}");
                Ok(CheckoutOutcome {
                    path: self.root.join(name),
                    created: false,
                })
            }
            MatchOutcome::Ambiguous(candidates) => Err(GitError::Ambiguous {
                token: token.to_string(),
                candidates,
            }
            .into()),
            // Branch names may contain `/`, so the remote is looked up by the
            // token as typed, not by its sanitized directory name.
            MatchOutcome::None if self.repo.remote_branch_exists(token)? => {
                log::info!("No worktree matches {token}; creating it from origin/{token}");
                self.create_worktree(token, hooks, cwd)
            }
            MatchOutcome::None => Err(GitError::NoMatch {
                token: token.to_string(),
                hint: Some(suggest_command("checkout", &[token], &["--create"])),
            }
            .into()),
        }
    }

    /// Create a worktree for `branch` and run the setup hook. If the hook
    /// fails, the worktree and the branch are removed again.
    fn create_worktree(
        &self,
        branch: &str,
        hooks: &HookRunner,
        cwd: &Path,
    ) -> anyhow::Result<CheckoutOutcome> {
        let directory = sanitize_branch(branch);
        let path = self.root.join(&directory);
        if path.symlink_metadata().is_ok() {
            return Err(self.occupied_error(branch, &directory, path)?.into());
        }

        let remote = self.repo.remote_branch_exists(branch)?;
        let source = match (remote, self.repo.local_branch_exists(branch)?) {
            (true, true) => BranchSource::AdoptRemote,
            (true, false) => BranchSource::TrackRemote,
            (false, true) => BranchSource::Existing,
            (false, false) => BranchSource::NewBranch,
        };
        self.repo
            .add_worktree(&path, branch, source)
            .map_err(|e| GitError::step(format!("Failed to create worktree for {branch}"), e))?;
        log::info!("Created worktree {} for {branch}", path.display());

        let context = HookContext {
            root: self.root.clone(),
            worktree_dir: path.clone(),
            branch: branch.to_string(),
            source_worktree: Some(cwd.to_path_buf()),
        };
        match hooks.run(HookEvent::PostCreate, &context) {
            HookOutcome::Ok => {}
            HookOutcome::Skip(reason) => log::debug!("Setup skipped: {reason}"),
            HookOutcome::Fail(message) => {
                self.discard_worktree(&path, branch);
                return Err(GitError::HookFailed { message }.into());
            }
        }

        Ok(CheckoutOutcome {
            path,
            created: true,
        })
    }

    /// `AlreadyExists`, or `DirectoryCollision` when the directory is the
    /// worktree of a different branch that sanitizes to the same name.
    fn occupied_error(
        &self,
        branch: &str,
        directory: &str,
        path: PathBuf,
    ) -> anyhow::Result<GitError> {
        let occupant = self
            .worktrees()?
            .into_iter()
            .find(|wt| wt.directory_name == directory)
            .and_then(|wt| wt.branch_name);
        Ok(match occupant {
            Some(occupant) if occupant != branch => GitError::DirectoryCollision {
                branch: branch.to_string(),
                directory: directory.to_string(),
                occupant,
            },
            _ => GitError::AlreadyExists { path },
        })
    }

    /// Compensate for a failed setup: remove the worktree, then force-delete
    /// the branch.
    fn discard_worktree(&self, path: &Path, branch: &str) {
        log::info!("Setup failed; removing {}", path.display());
        if let Err(e) = self.repo.remove_worktree(path, true) {
            log::debug!("git worktree remove failed ({e:#}); deleting directory");
            if let Err(e) = fs::remove_dir_all(path) {
                warn(format!("Failed to remove {}: {e}", path.display()));
            }
            if let Err(e) = self.repo.prune_worktrees() {
                warn(format!("Failed to prune worktree metadata: {e:#}"));
            }
        }
        if let Err(e) = self.repo.delete_branch(branch, true) {
            warn(format!("Failed to delete branch {branch}: {e:#}"));
        }
    }
}
