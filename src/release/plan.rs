//! Release plan: what a single release invocation will do
//!
//! Built once per run from the selected target and bump, consumed right away
//! by the release workflow.

use super::changelog::CHANGELOG_FILE;
use super::version::{VersionBump, is_pre_release, parse_version, tag_for};
use crate::core::config::VersionStrategy;
use crate::core::error::{RepoResult, ValidationError};
use crate::core::vcs::CommitInfo;
use crate::workspace::Package;
use semver::Version;
use std::path::{Path, PathBuf};

/// What gets released
#[derive(Debug, Clone)]
pub enum ReleaseTarget {
  /// One package with its own version and tag
  Package(Package),
  /// Every workspace package sharing one version (fixed strategy)
  Fixed { name: String, packages: Vec<Package> },
}

impl ReleaseTarget {
  /// Name used in tags and commit filtering
  pub fn name(&self) -> &str {
    match self {
      ReleaseTarget::Package(pkg) => &pkg.name,
      ReleaseTarget::Fixed { name, .. } => name,
    }
  }

  pub fn packages(&self) -> &[Package] {
    match self {
      ReleaseTarget::Package(pkg) => std::slice::from_ref(pkg),
      ReleaseTarget::Fixed { packages, .. } => packages,
    }
  }

  /// Current version. For a fixed target this is the highest package version.
  pub fn current_version(&self) -> RepoResult<Version> {
    let mut highest: Option<Version> = None;
    for pkg in self.packages() {
      let version = parse_version(&pkg.version)?;
      if highest.as_ref().is_none_or(|h| version > *h) {
        highest = Some(version);
      }
    }
    highest.ok_or_else(|| ValidationError::NoPackages.into())
  }

  /// Package changelog, or the root one for a fixed target
  pub fn changelog_path(&self, root: &Path) -> PathBuf {
    match self {
      ReleaseTarget::Package(pkg) => pkg.directory.join(CHANGELOG_FILE),
      ReleaseTarget::Fixed { .. } => root.join(CHANGELOG_FILE),
    }
  }

  /// Whether commits must mention the target to count
  pub fn filters_commits(&self, monorepo: bool) -> bool {
    monorepo && matches!(self, ReleaseTarget::Package(_))
  }
}

/// The computed outcome of one release invocation
#[derive(Debug, Clone)]
pub struct ReleasePlan {
  pub target: ReleaseTarget,
  pub bump: VersionBump,
  pub current_version: Version,
  pub new_version: Version,
  pub tag: String,
  pub commits: Vec<CommitInfo>,
  pub notes: String,
  pub draft: bool,
  pub prerelease: bool,
}

impl ReleasePlan {
  /// Compute version, tag and pre-release flag for a target
  pub fn new(
    target: ReleaseTarget,
    bump: VersionBump,
    preid: &str,
    strategy: VersionStrategy,
    draft: bool,
  ) -> RepoResult<Self> {
    let current_version = target.current_version()?;
    let new_version = bump.apply(&current_version, preid);
    let tag = tag_for(strategy, target.name(), &new_version);
    let prerelease = is_pre_release(&new_version.to_string());

    Ok(Self {
      target,
      bump,
      current_version,
      new_version,
      tag,
      commits: Vec::new(),
      notes: String::new(),
      draft,
      prerelease,
    })
  }
}
