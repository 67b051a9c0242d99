//! Version-control layer
//!
//! This module runs the hg and git log commands and parses their output.

pub mod constants;
mod executor;
/// Parser module (public for integration testing)
pub mod parser;
mod template;

pub use executor::{GitExecutor, HgExecutor, LogSource, StaticLog};
pub use parser::Parser;
pub use template::Templates;
