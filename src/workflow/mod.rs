//! Commit and release state machines
//!
//! Both flows are strictly sequential and take their collaborators as trait
//! objects: git through [`Vcs`], questions through [`Prompter`] and hosted
//! releases through [`crate::hosting::ReleasePublisher`]. Every prompt can
//! cancel, and cancellation is returned as `RepoError::Cancelled` before any
//! mutating step runs.

pub mod commit;
pub mod release;

use crate::core::error::{RepoResult, ValidationError};
use crate::core::vcs::{DEFAULT_REMOTE, Vcs};
use crate::ui::Prompter;
use crate::workspace::Package;
use std::path::Path;
use tracing::info;

/// Fail fast when the working directory is not a git work tree
pub(crate) fn verify_repository(vcs: &dyn Vcs) -> RepoResult<()> {
  if !vcs.is_repository() {
    return Err(ValidationError::NotARepository.into());
  }
  Ok(())
}

/// Fetch `origin` and offer to pull when the branch is behind.
///
/// Repositories without an `origin` remote skip the check. A declined pull
/// continues on the local state.
pub(crate) fn sync_check(vcs: &dyn Vcs, prompter: &mut dyn Prompter) -> RepoResult<()> {
  if !vcs.has_remote(DEFAULT_REMOTE)? {
    info!("no {} remote, skipping sync check", DEFAULT_REMOTE);
    return Ok(());
  }

  vcs.fetch(DEFAULT_REMOTE)?;
  let status = vcs.status()?;
  if status.behind == 0 {
    return Ok(());
  }

  let pull = prompter.confirm(
    &format!(
      "Your branch is {} commit(s) behind the remote. Do you want to pull changes?",
      status.behind
    ),
    true,
  )?;
  if pull {
    vcs.pull()?;
    println!("✅ Changes pulled successfully");
  }
  Ok(())
}

/// Package directory shown as a prompt hint, relative to the root when possible
pub(crate) fn display_dir(root: &Path, package: &Package) -> String {
  package
    .directory
    .strip_prefix(root)
    .ok()
    .filter(|rel| !rel.as_os_str().is_empty())
    .unwrap_or(&package.directory)
    .display()
    .to_string()
}
