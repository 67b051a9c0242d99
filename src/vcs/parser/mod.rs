//! Commit log parser
//!
//! Parses the output of the hg and git log templates into commit records.

mod log;


use regex::Regex;
use std::sync::LazyLock;

/// Regex for the first line of a log record
/// Format: `<id> <timestamp>[.fraction][ timezone]`
/// Examples:
/// - `9f3c1e2d... 1700000000` (git `%H %ct`)
/// - `4b7a0c9e... 1700000000.0-3600` (hg `{node} {date}`)
///
/// Groups:
/// 1. id (no embedded whitespace)
/// 2. integer seconds (optionally negative)
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+) (-?[0-9]+)(?:\.\S*)?(?:\s.*)?$").expect("Invalid log header regex")
});

/// Parser for commit log output
pub struct Parser;
