//! Branch queries and mutations for Repository.

use super::super::parse::non_empty_lines;
use super::{REMOTE, Repository};

impl Repository {
    /// Whether `refs/heads/<branch>` exists.
    pub fn local_branch_exists(&self, branch: &str) -> anyhow::Result<bool> {
        self.ref_exists(&format!("refs/heads/{branch}"))
    }

    /// Whether `refs/remotes/origin/<branch>` exists.
    pub fn remote_branch_exists(&self, branch: &str) -> anyhow::Result<bool> {
        self.ref_exists(&format!("refs/remotes/{REMOTE}/{branch}"))
    }

    fn ref_exists(&self, full_ref: &str) -> anyhow::Result<bool> {
        self.run_command_check(&["show-ref", "--verify", "--quiet", full_ref])
    }

    /// Local branch names, in ref order.
    pub fn local_branches(&self) -> anyhow::Result<Vec<String>> {
        // lstrip=2 instead of refname:short, which adds a "heads/" prefix when
        // a local and a remote branch share a name
        let stdout =
            self.run_command(&["for-each-ref", "--format=%(refname:lstrip=2)", "refs/heads/"])?;
        Ok(non_empty_lines(&stdout))
    }

    /// Branch names under `refs/remotes/origin/`, without the remote prefix.
    ///
    /// The `origin/HEAD` symref is skipped.
    pub fn remote_branch_names(&self) -> anyhow::Result<Vec<String>> {
        let stdout = self.run_command(&[
            "for-each-ref",
            "--format=%(refname:lstrip=3)",
            &format!("refs/remotes/{REMOTE}/"),
        ])?;
        Ok(non_empty_lines(&stdout)
            .into_iter()
            .filter(|name| name != "HEAD")
            .collect())
    }

    /// Delete a local branch. `force` uses `-D`, ignoring unmerged commits.
    pub fn delete_branch(&self, branch: &str, force: bool) -> anyhow::Result<()> {
        let flag = if force { "-D" } else { "-d" };
        self.run_command(&["branch", flag, branch])?;
        Ok(())
    }

    /// Set `branch` to track `origin/<branch>`.
    pub fn set_upstream(&self, branch: &str) -> anyhow::Result<()> {
        self.run_command(&[
            "branch",
            &format!("--set-upstream-to={REMOTE}/{branch}"),
            branch,
        ])?;
        Ok(())
    }
}
