//! Release planning and release artifacts
//!
//! - **version**: semver bumps, tag names, pre-release detection
//! - **filter**: which commits belong to a workspace package
//! - **notes**: release notes text and the per-author summary
//! - **changelog**: append-or-create CHANGELOG.md
//! - **plan**: the computed outcome of one release invocation

pub mod changelog;
pub mod filter;
pub mod notes;
pub mod plan;
pub mod version;

pub use plan::{ReleasePlan, ReleaseTarget};
pub use version::VersionBump;
