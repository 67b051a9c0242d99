//! Commit correspondence builder
//!
//! Matches primary (Git) commits to secondary (Mercurial) commits in two
//! passes:
//!
//! 1. Bucket both sides by timestamp. Within a bucket a secondary commit
//!    goes to the entry whose primary description matches, or to the only
//!    entry of a single-entry bucket. Anything else becomes an orphan.
//! 2. Pair the remaining orphans across timestamps by description.
//!
//! Every input commit ends up in exactly one entry of the resulting map.

use tracing::debug;

use super::Diagnostic;
use crate::model::{CommitRecord, CorrespondenceEntry, CorrespondenceMap};

/// Result of [`build`]: the map plus what was observed while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correspondence {
    pub map: CorrespondenceMap,
    pub diagnostics: Vec<Diagnostic>,
}

/// Where a secondary commit lands inside an existing bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Fill the secondary slot of this entry
    Fill(usize),
    /// Append a new secondary-only entry; `conflict` is the entry it would
    /// have been matched with had its slot been free
    Orphan { conflict: Option<usize> },
}

/// Build the correspondence between two commit logs
///
/// Both inputs are stably sorted by timestamp first, so commits sharing a
/// timestamp keep their log order. Never fails.
pub fn build(mut primary: Vec<CommitRecord>, mut secondary: Vec<CommitRecord>) -> Correspondence {
    let primary_len = primary.len();
    let secondary_len = secondary.len();
    debug!(
        primary = primary_len,
        secondary = secondary_len,
        "building commit map"
    );

    primary.sort_by_key(|c| c.timestamp);
    secondary.sort_by_key(|c| c.timestamp);

    let mut builder = Builder::default();
    builder.bucket_primary(primary);
    let secondary_orphans = builder.bucket_secondary(secondary);
    let primary_orphans: Vec<CommitRecord> = builder.map.primary_only().cloned().collect();
    builder.resolve_orphans(primary_orphans, secondary_orphans);

    debug_assert_eq!(builder.map.primary_count(), primary_len);
    debug_assert_eq!(builder.map.secondary_count(), secondary_len);

    Correspondence {
        map: builder.map,
        diagnostics: builder.diagnostics,
    }
}

#[derive(Debug, Default)]
struct Builder {
    map: CorrespondenceMap,
    diagnostics: Vec<Diagnostic>,
}

impl Builder {
    fn note(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// One primary-only entry per commit, never merged with a bucket neighbour
    fn bucket_primary(&mut self, commits: Vec<CommitRecord>) {
        for commit in commits {
            let existing = self
                .map
                .bucket(commit.timestamp)
                .and_then(|bucket| bucket.first())
                .and_then(CorrespondenceEntry::primary)
                .map(|first| first.id.clone());

            if let Some(existing) = existing {
                self.note(Diagnostic::TimestampCollision {
                    timestamp: commit.timestamp,
                    existing,
                    incoming: commit.id.clone(),
                });
            }

            self.map
                .push(commit.timestamp, CorrespondenceEntry::primary_only(commit));
        }
    }

    /// Place secondary commits into the buckets, returning the orphans in
    /// placement order
    fn bucket_secondary(&mut self, commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
        let mut orphans = Vec::new();

        for commit in commits {
            let timestamp = commit.timestamp;
            let Some(bucket) = self.map.bucket_mut(timestamp) else {
                // No primary commit at this timestamp
                self.map
                    .push(timestamp, CorrespondenceEntry::secondary_only(commit.clone()));
                orphans.push(commit);
                continue;
            };

            let placement = place(bucket, &commit);
            let conflict = match placement {
                Placement::Fill(index) => match bucket[index].with_secondary(commit.clone()) {
                    Some(filled) => {
                        bucket[index] = filled;
                        continue;
                    }
                    None => Some(index),
                },
                Placement::Orphan { conflict } => conflict,
            };

            let duplicate = conflict.map(|index| Diagnostic::DuplicateMatch {
                timestamp,
                primary: bucket[index].primary().map(|c| c.id.clone()),
                existing: bucket[index]
                    .secondary()
                    .map(|c| c.id.clone())
                    .unwrap_or_default(),
                incoming: commit.id.clone(),
            });
            bucket.push(CorrespondenceEntry::secondary_only(commit.clone()));
            orphans.push(commit);

            if let Some(diagnostic) = duplicate {
                self.note(diagnostic);
            }
        }

        orphans
    }

    /// Pair orphans across timestamps by description
    ///
    /// Primary orphans are taken in map order, each paired with the first
    /// remaining secondary orphan with the same trimmed description. This is
    /// the same pairing as rescanning both lists from the start after every
    /// merge, since a primary orphan that found no partner never gains one
    /// once secondary orphans start disappearing.
    fn resolve_orphans(
        &mut self,
        primary_orphans: Vec<CommitRecord>,
        secondary_orphans: Vec<CommitRecord>,
    ) {
        if primary_orphans.is_empty() && secondary_orphans.is_empty() {
            return;
        }
        debug!(
            primary = primary_orphans.len(),
            secondary = secondary_orphans.len(),
            "fixing orphaned commits"
        );

        let mut remaining: Vec<Option<CommitRecord>> =
            secondary_orphans.into_iter().map(Some).collect();
        let mut unresolved_primary = 0;

        for orphan in primary_orphans {
            let partner = remaining
                .iter()
                .position(|candidate| {
                    candidate
                        .as_ref()
                        .is_some_and(|c| c.same_description(&orphan))
                })
                .and_then(|index| remaining[index].take());

            match partner {
                Some(partner) => self.merge(orphan, partner),
                None => unresolved_primary += 1,
            }
        }

        let unresolved_secondary = remaining.iter().flatten().count();
        if unresolved_primary > 0 || unresolved_secondary > 0 {
            self.note(Diagnostic::UnresolvedOrphans {
                primary: unresolved_primary,
                secondary: unresolved_secondary,
            });
        }
    }

    /// Move `secondary` out of its orphan entry into `primary`'s entry
    fn merge(&mut self, primary: CommitRecord, secondary: CommitRecord) {
        if let Some(bucket) = self.map.bucket_mut(primary.timestamp)
            && let Some(index) = bucket.iter().position(|entry| {
                entry.secondary().is_none() && entry.primary() == Some(&primary)
            })
        {
            bucket[index] = CorrespondenceEntry::matched(primary.clone(), secondary.clone());
        }

        let mut emptied = false;
        if let Some(bucket) = self.map.bucket_mut(secondary.timestamp) {
            if let Some(index) = bucket.iter().position(|entry| {
                entry.primary().is_none() && entry.secondary() == Some(&secondary)
            }) {
                bucket.remove(index);
            }
            emptied = bucket.is_empty();
        }
        if emptied {
            self.map.remove_bucket(secondary.timestamp);
        }

        self.note(Diagnostic::OrphanResolved {
            drift: secondary.timestamp - primary.timestamp,
            description: primary.description,
            primary: primary.id,
            secondary: secondary.id,
        });
    }
}

/// Pick the entry a secondary commit should fill in a non-empty bucket
///
/// A single-entry bucket takes the commit whatever its description. In a
/// larger bucket only a primary with the same description qualifies; the
/// first such entry with a free slot wins.
fn place(bucket: &[CorrespondenceEntry], commit: &CommitRecord) -> Placement {
    if bucket.len() == 1 {
        return if bucket[0].secondary().is_none() {
            Placement::Fill(0)
        } else {
            Placement::Orphan { conflict: Some(0) }
        };
    }

    let describes = |entry: &CorrespondenceEntry| {
        entry
            .primary()
            .is_some_and(|primary| primary.same_description(commit))
    };

    if let Some(index) = bucket
        .iter()
        .position(|entry| describes(entry) && entry.secondary().is_none())
    {
        return Placement::Fill(index);
    }

    Placement::Orphan {
        conflict: bucket.iter().position(describes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(id: &str, timestamp: i64, description: &str) -> CommitRecord {
        CommitRecord::new(id, timestamp, description)
    }

    fn ids(entry: &CorrespondenceEntry) -> (Option<&str>, Option<&str>) {
        (
            entry.primary().map(|c| c.id.as_str()),
            entry.secondary().map(|c| c.id.as_str()),
        )
    }

    fn bucket_ids(map: &CorrespondenceMap, timestamp: i64) -> Vec<(Option<&str>, Option<&str>)> {
        map.bucket(timestamp)
            .map(|bucket| bucket.iter().map(ids).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_exact_timestamp_match() {
        let result = build(
            vec![commit("A", 1000, "fix bug")],
            vec![commit("B", 1000, "fix bug")],
        );

        assert_eq!(result.map.len(), 1);
        assert_eq!(bucket_ids(&result.map, 1000), vec![(Some("A"), Some("B"))]);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_drifted_timestamp_resolved_by_description() {
        let result = build(
            vec![commit("A", 1000, "fix bug")],
            vec![commit("B", 1005, "fix bug")],
        );

        assert_eq!(result.map.timestamps().collect::<Vec<_>>(), vec![1000]);
        assert_eq!(bucket_ids(&result.map, 1000), vec![(Some("A"), Some("B"))]);
        assert!(result.map.bucket(1005).is_none());
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::OrphanResolved {
                primary: "A".to_string(),
                secondary: "B".to_string(),
                description: "fix bug".to_string(),
                drift: 5,
            }]
        );
    }

    #[test]
    fn test_genuine_orphans_stay_one_sided() {
        let result = build(
            vec![commit("A", 1000, "fix bug")],
            vec![commit("B", 2000, "unrelated")],
        );

        assert_eq!(bucket_ids(&result.map, 1000), vec![(Some("A"), None)]);
        assert_eq!(bucket_ids(&result.map, 2000), vec![(None, Some("B"))]);
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::UnresolvedOrphans {
                primary: 1,
                secondary: 1
            }]
        );
    }

    #[test]
    fn test_timestamp_collision_matches_by_description() {
        let result = build(
            vec![commit("A", 1000, "x"), commit("A2", 1000, "y")],
            vec![commit("B", 1000, "y")],
        );

        assert_eq!(
            bucket_ids(&result.map, 1000),
            vec![(Some("A"), None), (Some("A2"), Some("B"))]
        );
        assert!(matches!(
            result.diagnostics[0],
            Diagnostic::TimestampCollision { timestamp: 1000, .. }
        ));
    }

    #[test]
    fn test_single_entry_bucket_accepts_mismatched_description() {
        let result = build(
            vec![commit("A", 1000, "original wording")],
            vec![commit("B", 1000, "reworded")],
        );

        assert_eq!(bucket_ids(&result.map, 1000), vec![(Some("A"), Some("B"))]);
    }

    #[test]
    fn test_multi_entry_bucket_without_description_match_makes_orphan() {
        let result = build(
            vec![commit("A", 1000, "x"), commit("A2", 1000, "y")],
            vec![commit("B", 1000, "z")],
        );

        assert_eq!(
            bucket_ids(&result.map, 1000),
            vec![(Some("A"), None), (Some("A2"), None), (None, Some("B"))]
        );
    }

    #[test]
    fn test_second_secondary_on_filled_entry_becomes_orphan() {
        let result = build(
            vec![commit("A", 1000, "x")],
            vec![commit("B", 1000, "x"), commit("B2", 1000, "x")],
        );

        assert_eq!(
            bucket_ids(&result.map, 1000),
            vec![(Some("A"), Some("B")), (None, Some("B2"))]
        );
        assert!(result.diagnostics.contains(&Diagnostic::DuplicateMatch {
            timestamp: 1000,
            primary: Some("A".to_string()),
            existing: "B".to_string(),
            incoming: "B2".to_string(),
        }));
    }

    #[test]
    fn test_identical_descriptions_in_one_bucket_fill_in_order() {
        let result = build(
            vec![commit("A", 1000, "same"), commit("A2", 1000, "same")],
            vec![commit("B", 1000, "same"), commit("B2", 1000, "same")],
        );

        assert_eq!(
            bucket_ids(&result.map, 1000),
            vec![(Some("A"), Some("B")), (Some("A2"), Some("B2"))]
        );
    }

    #[test]
    fn test_secondary_only_timestamps_share_a_bucket() {
        let result = build(
            vec![],
            vec![commit("B", 2000, "one"), commit("B2", 2000, "two")],
        );

        assert_eq!(
            bucket_ids(&result.map, 2000),
            vec![(None, Some("B")), (None, Some("B2"))]
        );
        assert!(result.diagnostics.contains(&Diagnostic::DuplicateMatch {
            timestamp: 2000,
            primary: None,
            existing: "B".to_string(),
            incoming: "B2".to_string(),
        }));
    }

    #[test]
    fn test_resolution_keeps_partial_bucket() {
        let result = build(
            vec![commit("A", 1000, "drifted"), commit("C", 2000, "other")],
            vec![
                commit("D", 1500, "stays"),
                commit("B", 1500, "drifted"),
                commit("E", 2000, "other"),
            ],
        );

        // B left bucket 1500, D is still there
        assert_eq!(bucket_ids(&result.map, 1000), vec![(Some("A"), Some("B"))]);
        assert_eq!(bucket_ids(&result.map, 1500), vec![(None, Some("D"))]);
        assert_eq!(bucket_ids(&result.map, 2000), vec![(Some("C"), Some("E"))]);
    }

    #[test]
    fn test_resolution_ties_follow_primary_order() {
        let result = build(
            vec![commit("A1", 1000, "dup"), commit("A2", 3000, "dup")],
            vec![commit("B1", 2000, "dup"), commit("B2", 4000, "dup")],
        );

        assert_eq!(bucket_ids(&result.map, 1000), vec![(Some("A1"), Some("B1"))]);
        assert_eq!(bucket_ids(&result.map, 3000), vec![(Some("A2"), Some("B2"))]);
        assert_eq!(result.map.timestamps().collect::<Vec<_>>(), vec![1000, 3000]);
    }

    #[test]
    fn test_resolution_ignores_surrounding_whitespace() {
        let result = build(
            vec![commit("A", 1000, "fix bug  ")],
            vec![commit("B", 1003, "  fix bug")],
        );

        assert_eq!(bucket_ids(&result.map, 1000), vec![(Some("A"), Some("B"))]);
    }

    #[test]
    fn test_inputs_are_sorted_stably() {
        let result = build(
            vec![
                commit("late", 3000, "c"),
                commit("first", 1000, "a"),
                commit("second", 1000, "b"),
            ],
            vec![],
        );

        assert_eq!(result.map.timestamps().collect::<Vec<_>>(), vec![1000, 3000]);
        assert_eq!(
            bucket_ids(&result.map, 1000),
            vec![(Some("first"), None), (Some("second"), None)]
        );
    }

    #[test]
    fn test_secondary_only_buckets_follow_primary_buckets() {
        let result = build(
            vec![commit("A", 5000, "a")],
            vec![commit("B", 1000, "b"), commit("A'", 5000, "a")],
        );

        assert_eq!(result.map.timestamps().collect::<Vec<_>>(), vec![5000, 1000]);
    }

    #[test]
    fn test_empty_inputs() {
        let result = build(vec![], vec![]);
        assert!(result.map.is_empty());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_counts_match_inputs() {
        let primary = vec![
            commit("A", 1000, "x"),
            commit("A2", 1000, "y"),
            commit("A3", 2000, "z"),
        ];
        let secondary = vec![
            commit("B", 1000, "y"),
            commit("B2", 1000, "q"),
            commit("B3", 2500, "z"),
            commit("B4", 9000, "new"),
        ];
        let result = build(primary, secondary);

        assert_eq!(result.map.primary_count(), 3);
        assert_eq!(result.map.secondary_count(), 4);
    }

    #[test]
    fn test_place_single_entry() {
        let bucket = vec![CorrespondenceEntry::primary_only(commit("A", 1, "x"))];
        assert_eq!(place(&bucket, &commit("B", 1, "y")), Placement::Fill(0));

        let filled = vec![CorrespondenceEntry::matched(
            commit("A", 1, "x"),
            commit("B", 1, "x"),
        )];
        assert_eq!(
            place(&filled, &commit("B2", 1, "x")),
            Placement::Orphan { conflict: Some(0) }
        );
    }

    #[test]
    fn test_place_prefers_free_matching_entry() {
        let bucket = vec![
            CorrespondenceEntry::matched(commit("A", 1, "x"), commit("B", 1, "x")),
            CorrespondenceEntry::primary_only(commit("A2", 1, "x")),
        ];
        assert_eq!(place(&bucket, &commit("B2", 1, "x")), Placement::Fill(1));
    }
}
