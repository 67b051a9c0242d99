//! hg and git command executors
//!
//! Handles running the log commands and capturing their output.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use super::constants::{self, git, hg};
use super::template::Templates;
use crate::error::SyncError;

/// Something that can hand out a raw commit log in the two-line record format
pub trait LogSource {
    /// Short label used in logs and error messages
    fn name(&self) -> &str;

    /// Fetch the raw log text
    fn log_raw(&self) -> Result<String, SyncError>;
}

/// Run a prepared command and return its stdout
///
/// A missing binary maps to [`SyncError::CommandNotFound`], a non-zero exit
/// to [`SyncError::CommandFailed`]. Output is decoded lossily.
fn run_command(mut cmd: Command) -> Result<String, SyncError> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    debug!(command = ?cmd, "running");

    let output = cmd.output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SyncError::CommandNotFound(program.clone())
        } else {
            SyncError::Io(e)
        }
    })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(SyncError::CommandFailed {
            command: program,
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}

/// Executor for `hg log` in a Mercurial repository
#[derive(Debug, Clone)]
pub struct HgExecutor {
    command: String,
    repo_path: PathBuf,
}

impl HgExecutor {
    pub fn new(repo_path: PathBuf) -> Self {
        Self::with_command(constants::HG_COMMAND, repo_path)
    }

    pub fn with_command(command: impl Into<String>, repo_path: PathBuf) -> Self {
        Self {
            command: command.into(),
            repo_path,
        }
    }

    /// `hg log` in plain mode, so user aliases and `[defaults]` cannot
    /// truncate or reshape the output
    fn command(&self) -> Command {
        let (plain_key, plain_value) = hg::PLAIN_ENV;
        let mut cmd = Command::new(&self.command);
        cmd.arg(hg::REPOSITORY)
            .arg(&self.repo_path)
            .args([hg::LOG, hg::TEMPLATE, Templates::hg_log()])
            .env(plain_key, plain_value)
            .current_dir(&self.repo_path);
        cmd
    }
}

impl LogSource for HgExecutor {
    fn name(&self) -> &str {
        "Mercurial"
    }

    fn log_raw(&self) -> Result<String, SyncError> {
        run_command(self.command())
    }
}

/// Executor for `git log` in the bare hg-git mirror
#[derive(Debug, Clone)]
pub struct GitExecutor {
    command: String,
    git_dir: PathBuf,
}

impl GitExecutor {
    pub fn new(git_dir: PathBuf) -> Self {
        Self::with_command(constants::GIT_COMMAND, git_dir)
    }

    pub fn with_command(command: impl Into<String>, git_dir: PathBuf) -> Self {
        Self {
            command: command.into(),
            git_dir,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.arg(git::GIT_DIR)
            .arg(&self.git_dir)
            .args([git::LOG, git::NO_SHOW_SIGNATURE, Templates::git_log()]);
        cmd
    }
}

impl LogSource for GitExecutor {
    fn name(&self) -> &str {
        "Git"
    }

    fn log_raw(&self) -> Result<String, SyncError> {
        run_command(self.command())
    }
}

/// A log that is already in memory
#[derive(Debug, Clone)]
pub struct StaticLog {
    name: String,
    text: String,
}

impl StaticLog {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl LogSource for StaticLog {
    fn name(&self) -> &str {
        &self.name
    }

    fn log_raw(&self) -> Result<String, SyncError> {
        Ok(self.text.clone())
    }
}
