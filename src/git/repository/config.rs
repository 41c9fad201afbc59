//! Git config operations for Repository.

use super::{GitError, Repository};

impl Repository {
    /// Get a git config value. Returns None if the key doesn't exist.
    pub fn get_config(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.config_get(&["config", "--get", key])
    }

    /// Get a git config value interpreted with git's boolean rules
    /// (`yes`/`on`/`1` are true, and so on).
    ///
    /// Returns None if the key doesn't exist, and an error if the value is
    /// not a valid boolean.
    pub fn get_config_bool(&self, key: &str) -> anyhow::Result<Option<bool>> {
        let Some(value) = self.config_get(&["config", "--type=bool", "--get", key])? else {
            return Ok(None);
        };
        match value.as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(GitError::ParseError {
                message: format!("Unexpected boolean for {key}: {other}"),
            }
            .into()),
        }
    }

    /// Set a git config value.
    pub fn set_config(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.run_command(&["config", key, value])?;
        Ok(())
    }

    /// `git config --get` exits 1 for a missing key; any other failure is real.
    fn config_get(&self, args: &[&str]) -> anyhow::Result<Option<String>> {
        let output = self.run_command_output(args)?;
        match (output.success, output.code) {
            (true, _) => Ok(Some(output.stdout.trim_end_matches('\n').to_string())),
            (false, Some(1)) => Ok(None),
            (false, _) => Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                output: output.combined(),
            }
            .into()),
        }
    }
}
