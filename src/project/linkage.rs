//! Hand-written worktree linkage.
//!
//! `git worktree add` both checks out files and registers the worktree. When
//! converting a repository in place the files are already where they belong,
//! so only the registration is written:
//!
//! ```text
//! <root>/.store/worktrees/<name>/
//!     gitdir      <root>/<name>/.git        back-reference
//!     commondir   ../..                     the shared store
//!     HEAD        ref: refs/heads/<branch>
//! <root>/<name>/.git
//!     gitdir: <root>/.store/worktrees/<name>
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::path::GIT_DIR;

/// Linkage between a worktree directory and the shared store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeLink {
    /// Shared store directory
    pub store: PathBuf,
    pub worktree_dir: PathBuf,
    /// Name of the metadata directory under `<store>/worktrees`
    pub name: String,
    pub branch: String,
}

impl WorktreeLink {
    pub fn new(
        store: impl Into<PathBuf>,
        worktree_dir: impl Into<PathBuf>,
        name: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            store: store.into(),
            worktree_dir: worktree_dir.into(),
            name: name.into(),
            branch: branch.into(),
        }
    }

    /// Per-worktree metadata directory inside the store.
    pub fn metadata_dir(&self) -> PathBuf {
        self.store.join("worktrees").join(&self.name)
    }

    /// The forward pointer file inside the worktree.
    pub fn pointer_file(&self) -> PathBuf {
        self.worktree_dir.join(GIT_DIR)
    }

    pub fn gitdir_content(&self) -> String {
        format!("{}\n", self.pointer_file().display())
    }

    pub fn commondir_content(&self) -> &'static str {
        "../..\n"
    }

    pub fn head_content(&self) -> String {
        format!("ref: refs/heads/{}\n", self.branch)
    }

    pub fn pointer_content(&self) -> String {
        format!("gitdir: {}\n", self.metadata_dir().display())
    }

    /// Write all four files.
    pub fn write(&self) -> std::io::Result<()> {
        let metadata_dir = self.metadata_dir();
        fs::create_dir_all(&metadata_dir)?;
        fs::write(metadata_dir.join("gitdir"), self.gitdir_content())?;
        fs::write(metadata_dir.join("commondir"), self.commondir_content())?;
        fs::write(metadata_dir.join("HEAD"), self.head_content())?;
        fs::write(self.pointer_file(), self.pointer_content())?;
        log::debug!(
            "Linked {} to {}",
            self.worktree_dir.display(),
            metadata_dir.display()
        );
        Ok(())
    }

    /// Remove whatever [`write`](Self::write) created. Missing files are fine.
    pub fn remove(&self) -> std::io::Result<()> {
        remove_if_exists(&self.pointer_file(), |p| fs::remove_file(p))?;
        remove_if_exists(&self.metadata_dir(), |p| fs::remove_dir_all(p))
    }

    /// Whether both ends of the link are in place.
    pub fn is_intact(&self) -> bool {
        self.pointer_file().is_file() && self.metadata_dir().join("gitdir").is_file()
    }
}

fn remove_if_exists(path: &Path, remove: fn(&Path) -> std::io::Result<()>) -> std::io::Result<()> {
    match remove(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
