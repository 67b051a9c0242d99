//! hgsync - rebuild the hg-git mapfile
//!
//! Binary entry point.

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use hgsync::sync::{self, Correspondence, DiagnosticLevel, Report, SyncConfig};
use hgsync::vcs::constants::{self, env};

#[derive(Parser, Debug)]
#[command(
    name = "hgsync",
    version,
    about = "Rebuild the hg-git mapfile by matching Mercurial commits to their Git mirror",
    long_about = "Matches every commit of a Mercurial repository with its counterpart in the \
    hg-git Git mirror (.hg/git), by timestamp and then by description, and writes the \
    mapfile hg-git uses to track them. Commits without a counterpart are reported.",
    after_help = "Back up your .hg/git-mapfile before running this."
)]
struct Cli {
    /// Path of the mapfile to write [default: <REPO>/.hg/git-mapfile]
    #[arg(index = 1, value_name = "MAPFILE")]
    mapfile: Option<PathBuf>,

    /// Mercurial repository root [default: current directory]
    #[arg(short = 'R', long, value_name = "REPO")]
    repo: Option<PathBuf>,

    /// Git mirror directory [default: <REPO>/.hg/git]
    #[arg(long, value_name = "DIR")]
    git_dir: Option<PathBuf>,

    /// Mercurial binary
    #[arg(long = "hg", env = env::HG, default_value = constants::HG_COMMAND)]
    hg_command: String,

    /// Git binary
    #[arg(long = "git", env = env::GIT, default_value = constants::GIT_COMMAND)]
    git_command: String,

    /// Report without writing the mapfile
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show matching details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors and leave diagnostics out of the report
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::ERROR
        } else {
            Level::INFO
        }
    }

    fn diagnostic_level(&self) -> DiagnosticLevel {
        if self.verbose {
            DiagnosticLevel::All
        } else if self.quiet {
            DiagnosticLevel::Hidden
        } else {
            DiagnosticLevel::Warnings
        }
    }

    fn into_config(self) -> std::io::Result<SyncConfig> {
        let repo = match self.repo {
            Some(repo) => repo,
            None => std::env::current_dir()?,
        };
        let mut config = SyncConfig::for_repo(repo);
        if let Some(git_dir) = self.git_dir {
            config.git_dir = git_dir;
        }
        if let Some(mapfile) = self.mapfile {
            config.mapfile = mapfile;
        }
        config.hg_command = self.hg_command;
        config.git_command = self.git_command;
        config.dry_run = self.dry_run;
        Ok(config)
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let level = cli.diagnostic_level();
    let config = cli.into_config()?;
    let outcome = sync::run(&config)?;

    print!("{}", render_report(&outcome.correspondence, level));

    Ok(())
}

/// The report printed to stdout; orphans and the summary are never
/// silenced, verbosity only selects the diagnostics
fn render_report(correspondence: &Correspondence, level: DiagnosticLevel) -> String {
    Report::new(correspondence).with_diagnostics(level).to_string()
}
