//! TestRepo helper for integration tests.
//!
//! Provides a temporary Mercurial repository plus a Git repository standing
//! in for its hg-git mirror.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Whether `binary --version` can be run.
pub fn command_available(binary: &str) -> bool {
    Command::new(binary)
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// A temporary Mercurial repository with a Git repository at `.hg/git`.
///
/// Both are cleaned up when the TestRepo is dropped.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create `hg init` + `git init` in a temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let repo = Self { dir };

        repo.hg(&["init"]);
        std::fs::create_dir_all(repo.git_dir()).expect("Failed to create git mirror dir");
        run(
            Command::new("git")
                .args(["init", "--quiet"])
                .current_dir(repo.git_dir()),
        );

        repo
    }

    /// Get the path to the Mercurial repository root.
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Work tree of the Git repository
    pub fn git_dir(&self) -> PathBuf {
        self.path().join(".hg").join("git")
    }

    /// `.git` directory of the Git repository, what `git --git-dir` expects
    pub fn git_metadata_dir(&self) -> PathBuf {
        self.git_dir().join(".git")
    }

    /// Execute an hg command in this repository.
    ///
    /// # Panics
    ///
    /// Panics if the command fails to execute or returns a non-zero exit code.
    pub fn hg(&self, args: &[&str]) -> String {
        run(Command::new("hg")
            .args(args)
            .env("HGPLAIN", "1")
            .env("HGUSER", "Test <test@example.com>")
            .current_dir(self.path()))
    }

    /// Commit a file to the Mercurial repository at a fixed timestamp.
    pub fn hg_commit(&self, file: &str, message: &str, timestamp: i64) {
        write_file(&self.path(), file, message);
        let date = format!("{timestamp} 0");
        self.hg(&["commit", "--addremove", "-m", message, "-d", &date]);
    }

    /// Commit a file to the Git repository at a fixed committer timestamp.
    pub fn git_commit(&self, file: &str, message: &str, timestamp: i64) {
        let git_dir = self.git_dir();
        write_file(&git_dir, file, message);
        let date = format!("{timestamp} +0000");

        run(Command::new("git")
            .args(["add", file])
            .current_dir(&git_dir));
        run(Command::new("git")
            .args([
                "-c",
                "user.name=Test",
                "-c",
                "user.email=test@example.com",
                "-c",
                "commit.gpgsign=false",
                "commit",
                "--quiet",
                "-m",
                message,
            ])
            .env("GIT_AUTHOR_DATE", &date)
            .env("GIT_COMMITTER_DATE", &date)
            .current_dir(&git_dir));
    }

    /// Full node hash of an hg revision.
    pub fn hg_node(&self, rev: &str) -> String {
        self.hg(&["log", "-r", rev, "--template", "{node}"])
            .trim()
            .to_string()
    }

    /// Full object id of a git revision.
    pub fn git_oid(&self, rev: &str) -> String {
        run(Command::new("git")
            .args(["rev-parse", rev])
            .current_dir(self.git_dir()))
        .trim()
        .to_string()
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    std::fs::write(&path, content).expect("Failed to write file");
}

fn run(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to execute command");
    if !output.status.success() {
        panic!(
            "{:?} failed with exit code {:?}:\n{}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}
