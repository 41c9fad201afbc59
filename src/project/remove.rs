//! Remove a worktree and its branch.

use std::path::{Path, PathBuf};

use super::{Project, WorktreeEntry};
use crate::fuzzy::{self, MatchOutcome};
use crate::git::GitError;
use crate::hooks::{HookContext, HookEvent, HookRunner};
use crate::path::{format_path_for_display, is_within};
use crate::styling::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Fuzzy token matched against directory and branch names
    pub name: String,
    /// Allow removing the head worktree, dirty worktrees and unmerged branches
    pub force: bool,
    /// Skip the confirmation prompt
    pub yes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub removed: WorktreeEntry,
    /// Set when the caller was inside the removed worktree
    pub relocate_to: Option<PathBuf>,
}

impl Project {
    /// Remove the worktree `options.name` resolves to, then delete its branch.
    ///
    /// `confirm` is asked before anything is touched unless `options.yes` is
    /// set; declining returns [`GitError::Aborted`].
    pub fn remove<F>(
        &self,
        options: &RemoveOptions,
        hooks: &HookRunner,
        cwd: &Path,
        confirm: F,
    ) -> anyhow::Result<RemoveOutcome>
    where
        F: FnOnce(&WorktreeEntry) -> anyhow::Result<bool>,
    {
        let target = self.resolve_worktree(&options.name)?;

        if target.is_head && !options.force {
            return Err(GitError::HeadWorktreeProtected {
                directory: target.directory_name,
            }
            .into());
        }
        if !options.yes && !confirm(&target)? {
            return Err(GitError::Aborted.into());
        }

        let inside = is_within(cwd, &target.path);
        let relocate_to = if inside {
            let destination = self.relocation_target(&[&target.path])?;
            self.leave_directory()?;
            Some(destination)
        } else {
            None
        };

        self.repo
            .remove_worktree(&target.path, options.force)
            .map_err(|e| {
                GitError::step(
                    format!(
                        "Failed to remove worktree {}",
                        format_path_for_display(&target.path)
                    ),
                    e,
                )
            })?;
        log::info!("Removed worktree {}", target.path.display());

        // The worktree is gone; a branch that can't be deleted is only a warning
        if let Some(branch) = &target.branch_name
            && let Err(e) = self.repo.delete_branch(branch, options.force)
        {
            warn(format!("Failed to delete branch {branch}: {e:#}"));
        }

        let context = HookContext {
            root: self.root.clone(),
            worktree_dir: target.path.clone(),
            branch: target.branch_name.clone().unwrap_or_default(),
            source_worktree: Some(cwd.to_path_buf()),
        };
        hooks.run(HookEvent::PostRemove, &context);

        Ok(RemoveOutcome {
            removed: target,
            relocate_to,
        })
    }

    /// Resolve `token` against every worktree's directory name and branch
    /// name. Several names of the same worktree matching is not ambiguous.
    fn resolve_worktree(&self, token: &str) -> anyhow::Result<WorktreeEntry> {
        let worktrees = self.worktrees()?;
        let mut names: Vec<&str> = Vec::new();
        for wt in &worktrees {
            let own_names = std::iter::once(wt.directory_name.as_str()).chain(wt.branch_name.as_deref());
            for name in own_names {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }

        let owner = |name: &str| {
            worktrees
                .iter()
                .position(|wt| wt.directory_name == name || wt.branch_name.as_deref() == Some(name))
        };

        let matched: Vec<usize> = match fuzzy::resolve(token, &names) {
            MatchOutcome::Exact(name) | MatchOutcome::Single(name) => {
                owner(name.as_str()).into_iter().collect()
            }
            MatchOutcome::Ambiguous(names) => {
                let mut owners: Vec<usize> = names.iter().filter_map(|n| owner(n.as_str())).collect();
                owners.sort_unstable();
                owners.dedup();
                owners
            }
            MatchOutcome::None => Vec::new(),
        };

        match matched.as_slice() {
            [index] => Ok(worktrees[*index].clone()),
            [] => Err(GitError::NoMatch {
                token: token.to_string(),
                hint: None,
            }
            .into()),
            many => Err(GitError::Ambiguous {
                token: token.to_string(),
                candidates: many
                    .iter()
                    .map(|i| worktrees[*i].directory_name.clone())
                    .collect(),
            }
            .into()),
        }
    }
}
