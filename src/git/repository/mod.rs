//! Repository handle and command execution.

use std::path::{Path, PathBuf};

use crate::shell_exec::{Cmd, CmdOutput};

use super::{GitError, WorktreeInfo};

mod branches;
mod config;
mod worktrees;


pub use worktrees::BranchSource;

/// Remote consulted for tracking branches.
pub const REMOTE: &str = "origin";

/// Handle to a git repository, bound to the directory git runs in.
///
/// Binding a project root works because the root's `.git` pointer file
/// redirects to the shared store; binding a worktree directory operates on
/// that worktree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    /// Bind to `path`. No validation happens until the first command runs.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory git runs in.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Clone `url` as a bare repository into `store`, then bind to `store`.
    pub fn clone_bare(url: &str, store: &Path) -> anyhow::Result<Self> {
        let cmd = Cmd::new("git")
            .arg("clone")
            .arg("--bare")
            .arg(url)
            .arg(store);
        let output = cmd.run()?;
        if !output.success {
            return Err(GitError::CommandFailed {
                command: cmd.display(),
                output: output.combined(),
            }
            .into());
        }
        Ok(Self::at(store))
    }

    fn git(&self, args: &[&str]) -> Cmd {
        Cmd::new("git").args(args).current_dir(&self.path)
    }

    /// Run git with `args`, capturing output regardless of exit status.
    pub fn run_command_output(&self, args: &[&str]) -> anyhow::Result<CmdOutput> {
        self.git(args).run()
    }

    /// Run git with `args` and return trimmed stdout.
    ///
    /// A non-zero exit becomes [`GitError::CommandFailed`] with stderr and
    /// stdout merged.
    pub fn run_command(&self, args: &[&str]) -> anyhow::Result<String> {
        let cmd = self.git(args);
        let output = cmd.run()?;
        if output.success {
            Ok(output.trimmed_stdout().to_string())
        } else {
            Err(GitError::CommandFailed {
                command: cmd.display(),
                output: output.combined(),
            }
            .into())
        }
    }

    /// Run git with `args` and report whether it exited 0.
    pub fn run_command_check(&self, args: &[&str]) -> anyhow::Result<bool> {
        Ok(self.git(args).run()?.success)
    }

    /// Current branch of the bound worktree; `None` when HEAD is detached.
    pub fn current_branch(&self) -> anyhow::Result<Option<String>> {
        let output = self.run_command_output(&["symbolic-ref", "--quiet", "HEAD"])?;
        Ok(super::parse::branch_from_symref(&output.stdout))
    }

    /// Branch the repository's own HEAD points at, if it is a local branch.
    ///
    /// For a bound project root this is the shared store's HEAD, which is
    /// what designates the head worktree.
    pub fn symbolic_head(&self) -> anyhow::Result<Option<String>> {
        self.current_branch()
    }

    /// Point HEAD at `refs/heads/<branch>`.
    pub fn set_symbolic_head(&self, branch: &str) -> anyhow::Result<()> {
        self.run_command(&["symbolic-ref", "HEAD", &format!("refs/heads/{branch}")])?;
        Ok(())
    }

    /// Whether the bound worktree has staged, unstaged or untracked changes.
    pub fn is_dirty(&self) -> anyhow::Result<bool> {
        let stdout = self.run_command(&["status", "--porcelain"])?;
        Ok(!stdout.is_empty())
    }

    /// Rebuild the index from HEAD, leaving the working tree untouched.
    pub fn reset_index(&self) -> anyhow::Result<()> {
        self.run_command(&["reset", "--quiet"])?;
        Ok(())
    }

    /// Stash all changes, untracked files included.
    pub fn stash_push(&self, message: &str) -> anyhow::Result<()> {
        self.run_command(&["stash", "push", "--include-untracked", "-m", message])?;
        Ok(())
    }

    /// Re-apply and drop the most recent stash.
    pub fn stash_pop(&self) -> anyhow::Result<()> {
        self.run_command(&["stash", "pop"])?;
        Ok(())
    }

    /// Fetch every remote, pruning refs whose remote branch was deleted.
    pub fn fetch_all_prune(&self) -> anyhow::Result<()> {
        self.run_command(&["fetch", "--all", "--prune"])?;
        Ok(())
    }

    /// Whether a remote called `name` is configured.
    pub fn has_remote(&self, name: &str) -> anyhow::Result<bool> {
        let stdout = self.run_command(&["remote"])?;
        Ok(stdout.lines().any(|line| line.trim() == name))
    }
}
