//! Correspondence data model
//!
//! A [`CorrespondenceMap`] groups [`CorrespondenceEntry`] values by timestamp.
//! Buckets keep their insertion order so that iterating the map, and anything
//! serialized from it, is reproducible.

use indexmap::IndexMap;

use super::CommitRecord;

/// A primary/secondary pair where at most one side may be absent
///
/// Entries are only built through [`primary_only`](Self::primary_only),
/// [`secondary_only`](Self::secondary_only) and [`matched`](Self::matched),
/// so an entry with both sides absent cannot exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrespondenceEntry {
    primary: Option<CommitRecord>,
    secondary: Option<CommitRecord>,
}

impl CorrespondenceEntry {
    pub fn primary_only(commit: CommitRecord) -> Self {
        Self {
            primary: Some(commit),
            secondary: None,
        }
    }

    pub fn secondary_only(commit: CommitRecord) -> Self {
        Self {
            primary: None,
            secondary: Some(commit),
        }
    }

    pub fn matched(primary: CommitRecord, secondary: CommitRecord) -> Self {
        Self {
            primary: Some(primary),
            secondary: Some(secondary),
        }
    }

    pub fn primary(&self) -> Option<&CommitRecord> {
        self.primary.as_ref()
    }

    pub fn secondary(&self) -> Option<&CommitRecord> {
        self.secondary.as_ref()
    }

    /// Both sides present
    pub fn is_matched(&self) -> bool {
        self.primary.is_some() && self.secondary.is_some()
    }

    /// Build a copy of this entry with its empty secondary slot filled
    ///
    /// Returns `None` when the secondary slot is already taken; a filled slot
    /// is never overwritten.
    pub fn with_secondary(&self, commit: CommitRecord) -> Option<Self> {
        if self.secondary.is_some() {
            return None;
        }
        Some(Self {
            primary: self.primary.clone(),
            secondary: Some(commit),
        })
    }
}

/// Insertion-ordered mapping from timestamp to the entries sharing it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrespondenceMap {
    buckets: IndexMap<i64, Vec<CorrespondenceEntry>>,
}

impl CorrespondenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the bucket for `timestamp`, creating the bucket at
    /// the end of the map if needed
    pub(crate) fn push(&mut self, timestamp: i64, entry: CorrespondenceEntry) {
        self.buckets.entry(timestamp).or_default().push(entry);
    }

    pub(crate) fn bucket_mut(&mut self, timestamp: i64) -> Option<&mut Vec<CorrespondenceEntry>> {
        self.buckets.get_mut(&timestamp)
    }

    /// Drop a bucket, keeping the order of the remaining ones
    pub(crate) fn remove_bucket(&mut self, timestamp: i64) {
        self.buckets.shift_remove(&timestamp);
    }

    pub fn bucket(&self, timestamp: i64) -> Option<&[CorrespondenceEntry]> {
        self.buckets.get(&timestamp).map(Vec::as_slice)
    }

    /// Number of timestamp buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = i64> + '_ {
        self.buckets.keys().copied()
    }

    pub fn buckets(&self) -> impl Iterator<Item = (i64, &[CorrespondenceEntry])> {
        self.buckets
            .iter()
            .map(|(timestamp, entries)| (*timestamp, entries.as_slice()))
    }

    /// All entries, bucket by bucket
    pub fn entries(&self) -> impl Iterator<Item = &CorrespondenceEntry> {
        self.buckets.values().flatten()
    }

    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Fully matched `(primary, secondary)` pairs in map order
    pub fn matched_pairs(&self) -> impl Iterator<Item = (&CommitRecord, &CommitRecord)> {
        self.entries()
            .filter_map(|entry| Some((entry.primary()?, entry.secondary()?)))
    }

    /// Primary commits left without a counterpart
    pub fn primary_only(&self) -> impl Iterator<Item = &CommitRecord> {
        self.entries()
            .filter(|entry| entry.secondary().is_none())
            .filter_map(CorrespondenceEntry::primary)
    }

    /// Secondary commits left without a counterpart
    pub fn secondary_only(&self) -> impl Iterator<Item = &CommitRecord> {
        self.entries()
            .filter(|entry| entry.primary().is_none())
            .filter_map(CorrespondenceEntry::secondary)
    }

    /// Number of entries holding a primary commit
    pub fn primary_count(&self) -> usize {
        self.entries().filter(|e| e.primary().is_some()).count()
    }

    /// Number of entries holding a secondary commit
    pub fn secondary_count(&self) -> usize {
        self.entries().filter(|e| e.secondary().is_some()).count()
    }
}
