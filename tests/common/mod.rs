//! Common test utilities for integration tests.
//!
//! This module provides helpers for creating temporary Mercurial
//! repositories with a Git mirror next to them.
//!
//! Note: Each integration test file compiles as a separate crate,
//! so not all helpers are used in every test file. We suppress
//! dead_code warnings at the module level.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod test_repo;

pub use test_repo::{TestRepo, command_available};

/// Return early from a test when a binary is not installed.
#[macro_export]
macro_rules! skip_if_missing {
    ($($binary:expr),+ $(,)?) => {
        $(
            if !$crate::common::command_available($binary) {
                eprintln!("skipping: {} is not installed", $binary);
                return;
            }
        )+
    };
}
