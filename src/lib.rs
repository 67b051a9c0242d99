//! hgsync - rebuild the hg-git mapfile
//!
//! Matches the commits of a Mercurial repository against its hg-git Git
//! mirror and writes the `<git> <hg>` mapfile hg-git uses to track them.
//!
//! This library provides:
//! - [`model`]: Commit records and the correspondence map
//! - [`vcs`]: hg/git log execution and parsing
//! - [`sync`]: The matching algorithm, mapfile and reporting
//! - [`error`]: The shared error type

pub mod error;
pub mod model;
pub mod sync;
pub mod vcs;

pub use error::SyncError;
