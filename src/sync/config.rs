//! Sync configuration
//!
//! Built by the binary from its command line; library callers can construct
//! it directly.

use std::path::{Path, PathBuf};

use crate::error::SyncError;
use crate::vcs::constants::{self, layout};

/// Everything a sync run needs to know about its environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Mercurial repository root
    pub repo: PathBuf,
    /// Bare Git mirror maintained by hg-git
    pub git_dir: PathBuf,
    /// Where the mapfile is written
    pub mapfile: PathBuf,
    /// Mercurial binary
    pub hg_command: String,
    /// Git binary
    pub git_command: String,
    /// Build and report, but leave the mapfile alone
    pub dry_run: bool,
}

impl SyncConfig {
    /// Default layout for a repository: mirror in `.hg/git`, mapfile in
    /// `.hg/git-mapfile`
    pub fn for_repo(repo: impl Into<PathBuf>) -> Self {
        let repo = repo.into();
        Self {
            git_dir: repo.join(layout::GIT_MIRROR),
            mapfile: repo.join(layout::MAPFILE),
            repo,
            hg_command: constants::HG_COMMAND.to_string(),
            git_command: constants::GIT_COMMAND.to_string(),
            dry_run: false,
        }
    }

    /// Check the repository layout before running any command
    pub fn validate(&self) -> Result<(), SyncError> {
        if !self.repo.join(layout::HG_DIR).is_dir() {
            return Err(SyncError::NotAMercurialRepository(self.repo.clone()));
        }
        if !self.git_dir.exists() {
            return Err(SyncError::MissingGitMirror(self.git_dir.clone()));
        }
        Ok(())
    }

    pub fn mapfile(&self) -> &Path {
        &self.mapfile
    }
}
