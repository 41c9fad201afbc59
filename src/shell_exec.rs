//! Subprocess execution with logging.
//!
//! Every external program grove runs (git, the hook tool) goes through [`Cmd`]
//! so that invocations show up uniformly under `-vv`:
//!
//! ```text
//! [DEBUG grove::shell_exec] $ git worktree list --porcelain [/home/u/proj]
//! [DEBUG grove::shell_exec]   exit 0 in 4ms
//! ```
//!
//! [`CmdOutput`] merges stderr and stdout the way the rest of the crate reports
//! failures: trimmed, stderr first, blank streams dropped.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use anyhow::Context;

/// Builder for a single blocking subprocess invocation.
#[derive(Debug, Clone)]
#[must_use]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    envs: Vec<(OsString, OsString)>,
}

/// Captured result of a finished subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CmdOutput {
    /// Trimmed stdout.
    pub fn trimmed_stdout(&self) -> &str {
        self.stdout.trim()
    }

    /// Trimmed stderr and stdout joined by a newline, skipping empty streams.
    pub fn combined(&self) -> String {
        [self.stderr.trim(), self.stdout.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Cmd {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Human-readable command line, used in logs and error messages.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|s| s.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion and capture output.
    ///
    /// Only spawn failures (program missing, cwd gone) are errors here; a
    /// non-zero exit is reported through [`CmdOutput::success`].
    pub fn run(&self) -> anyhow::Result<CmdOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        let cwd_display = self
            .cwd
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ".".to_string());
        log::debug!("$ {} [{}]", self.display(), cwd_display);

        let started = Instant::now();
        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute: {}", self.display()))?;
        log::debug!(
            "  exit {} in {}ms",
            output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string()),
            started.elapsed().as_millis()
        );

        Ok(CmdOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
