//! CLI commands for repo
//!
//! - **commit**: guided Conventional Commits message, stage, commit, push
//! - **release**: version bump, tag, GitHub release, changelog
//! - **check**: read-only repository diagnostics
//!
//! All commands accept `&RepoContext` and wire the real collaborators into
//! the workflows.

pub mod check;
pub mod commit;
pub mod release;

pub use check::run_check;
pub use commit::run_commit;
pub use release::run_release;
