//! Core building blocks shared by every command
//!
//! - **config**: repository configuration read from the root package.json
//! - **context**: run-level context built once in main
//! - **error**: error types with exit codes and help messages
//! - **vcs**: git abstraction (SystemGit)

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
