//! Create a project from a remote.
//!
//! No rollback: the destination did not exist beforehand, so after a failure
//! the caller can simply discard it.

use std::fs;
use std::path::{Path, PathBuf};

use super::{FALLBACK_DEFAULT_BRANCH, FETCH_REFSPEC, Project};
use crate::git::{BranchSource, GitError, Repository};
use crate::path::{
    GIT_DIR, POINTER_CONTENT, STORE_DIR, canonicalize, format_path_for_display, sanitize_branch,
};
use crate::styling::warn;

/// Result of [`clone`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneOutcome {
    pub root: PathBuf,
    /// Worktree for the default branch
    pub worktree: PathBuf,
    pub branch: String,
}

/// Clone `url` into a new project at `dest`.
pub fn clone(url: &str, dest: &Path) -> anyhow::Result<CloneOutcome> {
    if dest.exists() {
        return Err(GitError::AlreadyExists {
            path: dest.to_path_buf(),
        }
        .into());
    }

    fs::create_dir_all(dest).map_err(|e| {
        GitError::step(
            format!("Failed to create {}", format_path_for_display(dest)),
            e,
        )
    })?;
    let root = canonicalize(dest).map_err(|e| {
        GitError::step(
            format!("Failed to resolve {}", format_path_for_display(dest)),
            e,
        )
    })?;

    log::info!("Cloning {url} into {}", root.join(STORE_DIR).display());
    Repository::clone_bare(url, &root.join(STORE_DIR))
        .map_err(|e| GitError::step(format!("Failed to clone {url}"), e))?;

    fs::write(root.join(GIT_DIR), POINTER_CONTENT)
        .map_err(|e| GitError::step("Failed to write pointer file", e))?;

    let project = Project::at(&root);
    let repo = project.repo();

    let branch = detect_default_branch(repo)
        .map_err(|e| GitError::step("Failed to detect default branch", e))?;
    repo.set_symbolic_head(&branch)
        .map_err(|e| GitError::step(format!("Failed to point HEAD at {branch}"), e))?;

    let worktree = root.join(sanitize_branch(&branch));
    repo.add_worktree(&worktree, &branch, BranchSource::Existing)
        .map_err(|e| GitError::step(format!("Failed to create worktree for {branch}"), e))?;

    repo.set_config("core.bare", "true")
        .and_then(|()| repo.set_config("remote.origin.fetch", FETCH_REFSPEC))
        .map_err(|e| GitError::step("Failed to configure store", e))?;

    repo.fetch_all_prune()
        .map_err(|e| GitError::step("Failed to fetch", e))?;

    if let Err(e) = repo.set_upstream(&branch) {
        warn(format!("Failed to set upstream for {branch}: {e:#}"));
    }

    Ok(CloneOutcome {
        root,
        worktree,
        branch,
    })
}

/// The store's HEAD if it names an existing branch, else the first local
/// branch, else the fallback name.
fn detect_default_branch(repo: &Repository) -> anyhow::Result<String> {
    if let Some(head) = repo.symbolic_head()?
        && repo.local_branch_exists(&head)?
    {
        return Ok(head);
    }
    let first = repo.local_branches()?.into_iter().next();
    log::debug!("HEAD does not name a branch; first local branch is {first:?}");
    Ok(first.unwrap_or_else(|| FALLBACK_DEFAULT_BRANCH.to_string()))
}
