//! Advisory observations collected while building a correspondence

use std::fmt;

/// Something worth telling the user about that does not affect the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Two primary commits share one timestamp
    TimestampCollision {
        timestamp: i64,
        existing: String,
        incoming: String,
    },
    /// A secondary commit targeted an entry whose secondary slot was already
    /// taken, so it was kept as an orphan instead
    DuplicateMatch {
        timestamp: i64,
        primary: Option<String>,
        existing: String,
        incoming: String,
    },
    /// Two orphans at different timestamps were paired by description
    OrphanResolved {
        primary: String,
        secondary: String,
        description: String,
        /// `secondary.timestamp - primary.timestamp`
        drift: i64,
    },
    /// Orphans left after resolution, per side
    UnresolvedOrphans { primary: usize, secondary: usize },
}

impl Diagnostic {
    /// Whether this should be surfaced as a warning rather than as detail
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Diagnostic::DuplicateMatch { .. } | Diagnostic::UnresolvedOrphans { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TimestampCollision {
                timestamp,
                existing,
                incoming,
            } => write!(
                f,
                "Conflicting timestamps between {incoming} and {existing} ({timestamp})"
            ),
            Diagnostic::DuplicateMatch {
                timestamp,
                primary,
                existing,
                incoming,
            } => write!(
                f,
                "Attempting to match 2 commits ({existing} and {incoming}) to the same base commit {} ({timestamp})... creating orphan instead",
                primary.as_deref().unwrap_or("<none>")
            ),
            Diagnostic::OrphanResolved {
                primary,
                secondary,
                description,
                drift,
            } => write!(
                f,
                "Mapping '{primary}' to '{secondary}' (same description: {}, timestamp difference: {drift})",
                description.trim()
            ),
            Diagnostic::UnresolvedOrphans { primary, secondary } => {
                write!(f, "Still have {primary} and {secondary} orphaned commits")
            }
        }
    }
}
