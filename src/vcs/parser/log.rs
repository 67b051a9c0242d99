//! Log output parser (hg log / git log)

use super::{HEADER_REGEX, Parser};
use crate::error::SyncError;
use crate::model::CommitRecord;

/// Record being assembled while walking the log
enum Pending {
    /// Header seen, description line expected next
    Header {
        id: String,
        timestamp: i64,
        line: usize,
        text: String,
    },
    /// Both lines seen, blank separator or end of text expected next
    Complete {
        commit: CommitRecord,
        line: usize,
        text: String,
    },
}

impl Parser {
    /// Parse a log in the two-line record format into commit records
    ///
    /// Records are separated by empty lines; runs of them are allowed. A line
    /// holding only whitespace is not a separator.
    /// The line after a header is always taken as the description, even when
    /// empty. Output keeps input order.
    ///
    /// Any malformed record aborts parsing with [`SyncError::MalformedRecord`];
    /// no partial result is returned.
    pub fn parse_log(output: &str) -> Result<Vec<CommitRecord>, SyncError> {
        let mut commits = Vec::new();
        let mut pending: Option<Pending> = None;

        for (index, line) in output.lines().enumerate() {
            let line_number = index + 1;
            let is_blank = line.is_empty();

            pending = match pending.take() {
                None if is_blank => None,
                None => {
                    let (id, timestamp) = Self::parse_header(line, line_number)?;
                    Some(Pending::Header {
                        id,
                        timestamp,
                        line: line_number,
                        text: line.to_string(),
                    })
                }
                Some(Pending::Header {
                    id,
                    timestamp,
                    line: header_line,
                    text,
                }) => Some(Pending::Complete {
                    commit: CommitRecord::new(id, timestamp, line),
                    line: header_line,
                    text,
                }),
                Some(Pending::Complete { commit, .. }) if is_blank => {
                    commits.push(commit);
                    None
                }
                // The fault lies with the record that should have ended here
                Some(Pending::Complete { line, text, .. }) => {
                    return Err(SyncError::MalformedRecord {
                        line,
                        text,
                        reason: "expected a blank line after the description",
                    });
                }
            };
        }

        match pending {
            None => {}
            Some(Pending::Complete { commit, .. }) => commits.push(commit),
            Some(Pending::Header { line, text, .. }) => {
                return Err(SyncError::MalformedRecord {
                    line,
                    text,
                    reason: "missing description line",
                });
            }
        }

        Ok(commits)
    }

    /// Split a header line into id and integer timestamp
    pub(super) fn parse_header(line: &str, line_number: usize) -> Result<(String, i64), SyncError> {
        let malformed = |reason| SyncError::MalformedRecord {
            line: line_number,
            text: line.to_string(),
            reason,
        };

        let caps = HEADER_REGEX
            .captures(line)
            .ok_or_else(|| malformed("expected \"<id> <timestamp>\""))?;
        let timestamp = caps[2]
            .parse::<i64>()
            .map_err(|_| malformed("timestamp out of range"))?;

        Ok((caps[1].to_string(), timestamp))
    }
}
