//! Commit record data model

/// One commit as reported by a version-control log
///
/// Records are created by the log parser and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Commit identifier within its own system (node hash, object id)
    pub id: String,

    /// Seconds since the Unix epoch, not unique within a log
    pub timestamp: i64,

    /// First line of the commit message
    pub description: String,
}

impl CommitRecord {
    pub fn new(id: impl Into<String>, timestamp: i64, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp,
            description: description.into(),
        }
    }

    /// Description with surrounding whitespace removed, used for matching
    pub fn match_key(&self) -> &str {
        self.description.trim()
    }

    /// Whether both commits carry the same description once trimmed
    pub fn same_description(&self, other: &CommitRecord) -> bool {
        self.match_key() == other.match_key()
    }
}
