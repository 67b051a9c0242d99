//! Commit correspondence between a Mercurial repository and its Git mirror
//!
//! [`build`] is the matching core; [`run`] wires it to the log sources and
//! the mapfile.

mod builder;
mod config;
mod diagnostic;
mod mapfile;
mod report;

pub use builder::{Correspondence, build};
pub use config::SyncConfig;
pub use diagnostic::Diagnostic;
pub use mapfile::{parse_mapfile, render_mapfile, save_mapfile, write_mapfile};
pub use report::{DiagnosticLevel, Report, Summary};

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::SyncError;
use crate::model::CommitRecord;
use crate::vcs::{GitExecutor, HgExecutor, LogSource, Parser};

/// What a sync run produced
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub correspondence: Correspondence,
    /// Mapfile path and number of pairs written, `None` on a dry run
    pub saved: Option<(PathBuf, usize)>,
}

/// Fetch and parse one log
fn read_log(source: &dyn LogSource) -> Result<Vec<CommitRecord>, SyncError> {
    let raw = source.log_raw()?;
    let commits = Parser::parse_log(&raw)?;
    debug!(source = source.name(), commits = commits.len(), "parsed log");
    Ok(commits)
}

/// Build the correspondence from two log sources and save the mapfile
///
/// Both logs are parsed before anything is built, so a malformed log leaves
/// the existing mapfile untouched.
pub fn run_with_sources(
    config: &SyncConfig,
    git: &dyn LogSource,
    hg: &dyn LogSource,
) -> Result<SyncOutcome, SyncError> {
    let git_commits = read_log(git)?;
    let hg_commits = read_log(hg)?;

    let correspondence = build(git_commits, hg_commits);

    let saved = if config.dry_run {
        info!("Dry run, not writing map file");
        None
    } else {
        let written = save_mapfile(&correspondence.map, config.mapfile())?;
        Some((config.mapfile().to_path_buf(), written))
    };

    Ok(SyncOutcome {
        correspondence,
        saved,
    })
}

/// Validate the repository layout and sync using the real hg and git binaries
pub fn run(config: &SyncConfig) -> Result<SyncOutcome, SyncError> {
    config.validate()?;

    let git = GitExecutor::with_command(&config.git_command, config.git_dir.clone());
    let hg = HgExecutor::with_command(&config.hg_command, config.repo.clone());
    run_with_sources(config, &git, &hg)
}
