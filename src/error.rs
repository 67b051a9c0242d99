//! Error type shared by the parser, the executors and the mapfile layer

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading logs or writing the mapfile
///
/// Orphaned commits are not errors; they are reported through
/// [`Diagnostic`](crate::sync::Diagnostic) values instead.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Malformed log record at line {line} ({reason}): {text:?}")]
    MalformedRecord {
        line: usize,
        text: String,
        reason: &'static str,
    },

    #[error("Malformed mapfile line {line}: {text:?}")]
    MalformedMapLine { line: usize, text: String },

    #[error("Not a Mercurial repository: {}", .0.display())]
    NotAMercurialRepository(PathBuf),

    #[error("No Git mirror to sync with at {}", .0.display())]
    MissingGitMirror(PathBuf),

    #[error("{0} is not installed or not in PATH")]
    CommandNotFound(String),

    #[error("{command} failed (exit code {exit_code}): {stderr}")]
    CommandFailed {
        command: String,
        stderr: String,
        exit_code: i32,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
