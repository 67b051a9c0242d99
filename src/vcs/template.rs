//! Log templates for stable output parsing
//!
//! Both templates produce the same two-line record layout so a single parser
//! handles either log:
//!
//! ```text
//! <id> <timestamp>[.fraction][ timezone]
//! <first line of description>
//! <blank>
//! ```

/// Templates for the log commands
pub struct Templates;

impl Templates {
    /// Template for `hg log --template`
    ///
    /// `{date}` renders as `<seconds>.<timezone offset>`, the parser keeps the
    /// integer part.
    pub fn hg_log() -> &'static str {
        "{node} {date}\n{firstline(desc)}\n\n"
    }

    /// Format string for `git log --format`
    ///
    /// `%ct` is the committer timestamp, which is what hg-git writes when it
    /// exports a Mercurial changeset.
    pub fn git_log() -> &'static str {
        "--format=%H %ct%n%s%n%n"
    }
}
