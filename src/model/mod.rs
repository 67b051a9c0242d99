//! Data models for hgsync
//!
//! Plain data structures shared by the log parser, the correspondence
//! builder and the reporting layer.

mod commit;
mod correspondence;

pub use commit::CommitRecord;
pub use correspondence::{CorrespondenceEntry, CorrespondenceMap};
