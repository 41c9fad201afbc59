//! In-place conversion of a plain repository into a project.
//!
//! ```text
//! before                      after
//! repo/                       repo/
//!   .git/                       .store/          (was .git, now bare)
//!   src/                        .git             "gitdir: ./.store"
//!   README.md                   main/
//!                                 .git           linked worktree
//!                                 src/
//!                                 README.md
//! ```
//!
//! Every step up to and including the worktree linkage is undone if a later
//! step fails. Restoring stashed changes comes after the conversion has
//! succeeded, so a failure there is only a warning.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::FETCH_REFSPEC;
use super::linkage::WorktreeLink;
use crate::git::{BranchSource, GitError, REMOTE, Repository};
use crate::path::{
    GIT_DIR, POINTER_CONTENT, STORE_DIR, canonicalize, find_project_root, format_path_for_display,
    sanitize_branch,
};
use crate::styling::warn;

const STASH_MESSAGE: &str = "grove init";
const FETCH_KEY: &str = "remote.origin.fetch";

/// Result of [`convert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutcome {
    /// The primary worktree directory
    pub worktree: PathBuf,
    pub branch: String,
    /// The project already existed and was only checked and repaired
    pub repaired: bool,
}

/// Convert the repository at `root` into a project, or repair an existing one.
pub fn convert(root: &Path) -> anyhow::Result<InitOutcome> {
    let root = canonicalize(root).map_err(|e| {
        GitError::step(format!("Failed to resolve {}", format_path_for_display(root)), e)
    })?;

    if root.join(STORE_DIR).is_dir() {
        return repair(&root);
    }
    if let Some(project_root) = find_project_root(&root) {
        return Err(GitError::AlreadyInitialized {
            path: root,
            root: project_root,
        }
        .into());
    }
    if !root.join(GIT_DIR).is_dir() {
        return Err(GitError::NotARepository { path: root }.into());
    }

    let repo = Repository::at(&root);
    let branch = repo
        .current_branch()
        .map_err(|e| GitError::step("Failed to determine current branch", e))?
        .ok_or_else(|| GitError::StepFailed {
            step: "Failed to determine current branch".into(),
            output: "HEAD is detached".into(),
        })?;

    let mut conversion = Conversion::new(&root, &branch);
    if let Err(e) = conversion.run(&repo) {
        log::info!("Conversion failed, rolling back: {e:#}");
        conversion.rollback();
        return Err(e);
    }
    conversion.restore_stash();

    log::info!(
        "Converted {} with worktree {}",
        root.display(),
        conversion.link.worktree_dir.display()
    );
    Ok(InitOutcome {
        worktree: conversion.link.worktree_dir,
        branch,
        repaired: false,
    })
}

/// Progress of a conversion, recorded so that rollback undoes exactly the
/// steps that completed.
#[derive(Debug)]
struct Conversion {
    root: PathBuf,
    link: WorktreeLink,
    stashed: bool,
    store_renamed: bool,
    pointer_written: bool,
    /// Set once the store's config may have changed, with the prior refspec
    configured: Option<Option<String>>,
    dir_created: bool,
    moved: Vec<OsString>,
    linked: bool,
    index_moved: bool,
}

impl Conversion {
    fn new(root: &Path, branch: &str) -> Self {
        let dir_name = sanitize_branch(branch);
        Self {
            root: root.to_path_buf(),
            link: WorktreeLink::new(root.join(STORE_DIR), root.join(&dir_name), dir_name, branch),
            stashed: false,
            store_renamed: false,
            pointer_written: false,
            configured: None,
            dir_created: false,
            moved: Vec::new(),
            linked: false,
            index_moved: false,
        }
    }

    fn git_dir(&self) -> PathBuf {
        self.root.join(GIT_DIR)
    }

    fn run(&mut self, repo: &Repository) -> anyhow::Result<()> {
        let dirty = repo
            .is_dirty()
            .map_err(|e| GitError::step("Failed to check for uncommitted changes", e))?;
        if dirty {
            repo.stash_push(STASH_MESSAGE)
                .map_err(|e| GitError::step("Failed to stash uncommitted changes", e))?;
            self.stashed = true;
        }

        fs::rename(self.git_dir(), &self.link.store).map_err(|e| {
            GitError::step(format!("Failed to rename {GIT_DIR} to {STORE_DIR}"), e)
        })?;
        self.store_renamed = true;

        fs::write(self.git_dir(), POINTER_CONTENT)
            .map_err(|e| GitError::step("Failed to write pointer file", e))?;
        self.pointer_written = true;

        self.configure(repo)
            .map_err(|e| GitError::step("Failed to configure store", e))?;

        let worktree_dir = self.link.worktree_dir.clone();
        fs::create_dir(&worktree_dir).map_err(|e| {
            GitError::step(
                format!(
                    "Failed to create worktree directory {}",
                    format_path_for_display(&worktree_dir)
                ),
                e,
            )
        })?;
        self.dir_created = true;

        self.move_entries()?;

        self.link.write().map_err(|e| {
            GitError::step(
                format!(
                    "Failed to link worktree {}",
                    format_path_for_display(&worktree_dir)
                ),
                e,
            )
        })?;
        self.linked = true;

        // The index belongs to the worktree now; keeping it means the
        // worktree reports the same status as before the conversion
        let index = self.link.store.join("index");
        if index.is_file() {
            fs::rename(&index, self.link.metadata_dir().join("index"))
                .map_err(|e| GitError::step("Failed to move index into worktree metadata", e))?;
            self.index_moved = true;
        }

        Ok(())
    }

    fn configure(&mut self, repo: &Repository) -> anyhow::Result<()> {
        self.configured = Some(repo.get_config(FETCH_KEY)?);
        repo.set_config("core.bare", "true")?;
        if repo.has_remote(REMOTE)? {
            repo.set_config(FETCH_KEY, FETCH_REFSPEC)?;
        } else {
            warn(format!("No remote named {REMOTE}; skipping fetch refspec"));
        }
        Ok(())
    }

    fn move_entries(&mut self) -> anyhow::Result<()> {
        let worktree_dir = self.link.worktree_dir.clone();
        let skip = [
            OsString::from(STORE_DIR),
            OsString::from(GIT_DIR),
            OsString::from(&self.link.name),
        ];
        let entries = fs::read_dir(&self.root)
            .map_err(|e| GitError::step("Failed to list repository contents", e))?;
        for entry in entries {
            let name = entry
                .map_err(|e| GitError::step("Failed to list repository contents", e))?
                .file_name();
            if skip.contains(&name) {
                continue;
            }
            fs::rename(self.root.join(&name), worktree_dir.join(&name)).map_err(|e| {
                GitError::step(
                    format!(
                        "Failed to move {} into {}",
                        name.to_string_lossy(),
                        format_path_for_display(&worktree_dir)
                    ),
                    e,
                )
            })?;
            self.moved.push(name);
        }
        log::debug!("Moved {} entries into {}", self.moved.len(), worktree_dir.display());
        Ok(())
    }

    /// Undo completed steps in reverse order. Each undo is attempted even if
    /// an earlier one failed.
    fn rollback(&self) {
        let metadata_dir = self.link.metadata_dir();
        if self.index_moved {
            undo(
                "restore the index",
                fs::rename(metadata_dir.join("index"), self.link.store.join("index")),
            );
        }
        if self.linked || self.dir_created {
            undo("remove worktree linkage", self.link.remove());
            // Only present because the linkage created it
            let _ = fs::remove_dir(self.link.store.join("worktrees"));
        }
        for name in self.moved.iter().rev() {
            undo(
                &format!("move {} back", name.to_string_lossy()),
                fs::rename(self.link.worktree_dir.join(name), self.root.join(name)),
            );
        }
        if self.dir_created {
            undo(
                "remove the worktree directory",
                fs::remove_dir(&self.link.worktree_dir),
            );
        }
        if self.pointer_written {
            undo("remove the pointer file", fs::remove_file(self.git_dir()));
        }
        if self.store_renamed {
            undo(
                &format!("rename {STORE_DIR} back to {GIT_DIR}"),
                fs::rename(&self.link.store, self.git_dir()),
            );
        }

        let repo = Repository::at(&self.root);
        if let Some(previous_fetch) = &self.configured {
            undo("restore core.bare", repo.set_config("core.bare", "false"));
            if let Some(refspec) = previous_fetch {
                undo("restore the fetch refspec", repo.set_config(FETCH_KEY, refspec));
            }
        }
        if self.stashed {
            undo("restore stashed changes", repo.stash_pop());
        }
    }

    fn restore_stash(&self) {
        if !self.stashed {
            return;
        }
        if let Err(e) = Repository::at(&self.link.worktree_dir).stash_pop() {
            warn(format!(
                "Failed to restore uncommitted changes in {}; they remain in git stash: {e:#}",
                format_path_for_display(&self.link.worktree_dir)
            ));
        }
    }
}

fn undo<E: Into<anyhow::Error>>(what: &str, result: Result<(), E>) {
    if let Err(e) = result {
        warn(format!("Rollback: failed to {what}: {:#}", e.into()));
    }
}

/// Re-assert the layout of an existing project without moving any files.
fn repair(root: &Path) -> anyhow::Result<InitOutcome> {
    let pointer = root.join(GIT_DIR);
    if !pointer.exists() {
        log::info!("Recreating pointer file {}", pointer.display());
        fs::write(&pointer, POINTER_CONTENT)
            .map_err(|e| GitError::step("Failed to write pointer file", e))?;
    }

    let repo = Repository::at(root);
    repo.set_config("core.bare", "true")
        .map_err(|e| GitError::step("Failed to configure store", e))?;

    let branch = repo
        .symbolic_head()
        .map_err(|e| GitError::step("Failed to determine head branch", e))?
        .ok_or_else(|| GitError::StepFailed {
            step: "Failed to determine head branch".into(),
            output: "HEAD of the store is detached".into(),
        })?;
    let dir_name = sanitize_branch(&branch);
    let worktree_dir = root.join(&dir_name);
    let link = WorktreeLink::new(root.join(STORE_DIR), &worktree_dir, &dir_name, &branch);

    if link.is_intact() {
        log::info!("{} is intact", worktree_dir.display());
    } else if worktree_dir.is_dir() {
        log::info!("Relinking {}", worktree_dir.display());
        link.write().map_err(|e| {
            GitError::step(
                format!(
                    "Failed to link worktree {}",
                    format_path_for_display(&worktree_dir)
                ),
                e,
            )
        })?;
        Repository::at(&worktree_dir)
            .reset_index()
            .map_err(|e| GitError::step("Failed to rebuild index", e))?;
    } else {
        log::info!("Recreating {}", worktree_dir.display());
        repo.prune_worktrees()
            .map_err(|e| GitError::step("Failed to prune worktree metadata", e))?;
        repo.add_worktree(&worktree_dir, &branch, BranchSource::Existing)
            .map_err(|e| {
                GitError::step(format!("Failed to recreate worktree for {branch}"), e)
            })?;
    }

    Ok(InitOutcome {
        worktree: worktree_dir,
        branch,
        repaired: true,
    })
}
