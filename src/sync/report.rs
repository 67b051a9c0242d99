//! Human-readable rendering of a correspondence

use std::fmt;

use super::{Correspondence, Diagnostic};

/// Entry counts of a correspondence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub matched: usize,
    pub git_only: usize,
    pub hg_only: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} matched, {} Git-only, {} Mercurial-only",
            self.matched, self.git_only, self.hg_only
        )
    }
}

/// Which builder diagnostics a [`Report`] includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagnosticLevel {
    #[default]
    Hidden,
    /// Duplicate matches and unresolved orphan counts
    Warnings,
    All,
}

impl DiagnosticLevel {
    fn shows(self, diagnostic: &Diagnostic) -> bool {
        match self {
            DiagnosticLevel::Hidden => false,
            DiagnosticLevel::Warnings => diagnostic.is_warning(),
            DiagnosticLevel::All => true,
        }
    }
}

/// Report over a correspondence built from Git (primary) and Mercurial
/// (secondary) logs
///
/// Renders the selected diagnostics, one line per one-sided entry in map
/// order, and a summary line. Orphan lines and the summary are always
/// rendered.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    correspondence: &'a Correspondence,
    diagnostics: DiagnosticLevel,
}

impl<'a> Report<'a> {
    pub fn new(correspondence: &'a Correspondence) -> Self {
        Self {
            correspondence,
            diagnostics: DiagnosticLevel::Hidden,
        }
    }

    pub fn with_diagnostics(mut self, level: DiagnosticLevel) -> Self {
        self.diagnostics = level;
        self
    }

    pub fn summary(&self) -> Summary {
        self.correspondence
            .map
            .entries()
            .fold(Summary::default(), |mut summary, entry| {
                match (entry.primary(), entry.secondary()) {
                    (Some(_), Some(_)) => summary.matched += 1,
                    (Some(_), None) => summary.git_only += 1,
                    (None, _) => summary.hg_only += 1,
                }
                summary
            })
    }

    /// One line per unmatched commit
    pub fn orphan_lines(&self) -> Vec<String> {
        self.correspondence
            .map
            .entries()
            .filter_map(|entry| match (entry.primary(), entry.secondary()) {
                (Some(git), None) => Some(format!(
                    "Git commit '{}' ({}) is new: {}",
                    git.id, git.timestamp, git.description
                )),
                (None, Some(hg)) => Some(format!(
                    "Mercurial commit '{}' ({}) has no Git mirror yet: {}",
                    hg.id, hg.timestamp, hg.description
                )),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.correspondence.diagnostics {
            if self.diagnostics.shows(diagnostic) {
                writeln!(f, "{diagnostic}")?;
            }
        }
        for line in self.orphan_lines() {
            writeln!(f, "{line}")?;
        }
        writeln!(f, "{}", self.summary())
    }
}
