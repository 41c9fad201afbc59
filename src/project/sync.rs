//! Prune worktrees whose remote branch is gone.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::{FALLBACK_DEFAULT_BRANCH, Project, WorktreeEntry};
use crate::path::is_within;
use crate::styling::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Report the stale set without removing anything
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub stale: Vec<WorktreeEntry>,
    pub removed: Vec<WorktreeEntry>,
    /// Entries whose worktree could not be removed, with the reason
    pub failed: Vec<(WorktreeEntry, String)>,
    pub dry_run: bool,
    /// Set when the caller was inside a pruned worktree
    pub relocate_to: Option<PathBuf>,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        self.stale.is_empty()
    }
}

impl Project {
    /// Fetch with pruning, then remove every worktree whose branch is neither
    /// the head branch nor present on the remote.
    ///
    /// Best-effort: a failed fetch, worktree removal or branch deletion is
    /// warned about and the remaining entries are still processed.
    pub fn sync(&self, options: SyncOptions, cwd: &Path) -> anyhow::Result<SyncReport> {
        if let Err(e) = self.repo.fetch_all_prune() {
            warn(format!("Fetch failed, using existing remote state: {e:#}"));
        }

        let head = self
            .head_branch()?
            .unwrap_or_else(|| FALLBACK_DEFAULT_BRANCH.to_string());
        let remote: HashSet<String> = self.repo.remote_branch_names()?.into_iter().collect();
        let stale = stale_worktrees(self.worktrees()?, &head, &remote);
        log::debug!(
            "Stale worktrees: {:?}",
            stale.iter().map(|wt| &wt.directory_name).collect::<Vec<_>>()
        );

        let mut report = SyncReport {
            stale,
            dry_run: options.dry_run,
            ..SyncReport::default()
        };
        if report.stale.is_empty() || options.dry_run {
            return Ok(report);
        }

        let leaving: Vec<&Path> = report.stale.iter().map(|wt| wt.path.as_path()).collect();
        if leaving.iter().any(|path| is_within(cwd, path)) {
            report.relocate_to = Some(self.relocation_target(&leaving)?);
            self.leave_directory()?;
        }

        for entry in report.stale.clone() {
            if let Err(e) = self.repo.remove_worktree(&entry.path, true) {
                let reason = format!("{e:#}");
                warn(format!(
                    "Failed to remove worktree {}: {reason}",
                    entry.directory_name
                ));
                report.failed.push((entry, reason));
                continue;
            }
            if let Some(branch) = &entry.branch_name
                && let Err(e) = self.repo.delete_branch(branch, true)
            {
                warn(format!("Failed to delete branch {branch}: {e:#}"));
            }
            log::info!("Pruned {}", entry.directory_name);
            report.removed.push(entry);
        }

        if let Err(e) = self.repo.prune_worktrees() {
            warn(format!("Failed to prune worktree metadata: {e:#}"));
        }

        Ok(report)
    }
}

/// Worktrees on a branch other than `head` with no `origin/<branch>`.
///
/// The head worktree and detached worktrees are never stale.
fn stale_worktrees(
    worktrees: Vec<WorktreeEntry>,
    head: &str,
    remote: &HashSet<String>,
) -> Vec<WorktreeEntry> {
    worktrees
        .into_iter()
        .filter(|wt| !wt.is_head)
        .filter(|wt| {
            wt.branch_name
                .as_deref()
                .is_some_and(|branch| branch != head && !remote.contains(branch))
        })
        .collect()
}
