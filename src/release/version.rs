//! Version planning: semver bumps, tag names and pre-release detection

use crate::core::config::{BranchConfig, RepoLayout, VersionStrategy};
use crate::core::error::{RepoResult, ValidationError};
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;

/// Pre-release identifier used when the branch has no channel
pub const DEFAULT_PREID: &str = "canary";

/// Release bump kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
  Major,
  Minor,
  Patch,
  /// Next major as a pre-release, e.g. `2.0.0-canary.0`
  Premajor,
}

impl VersionBump {
  pub const ALL: [VersionBump; 4] = [
    VersionBump::Major,
    VersionBump::Minor,
    VersionBump::Patch,
    VersionBump::Premajor,
  ];

  pub fn label(&self) -> &'static str {
    match self {
      VersionBump::Major => "Major",
      VersionBump::Minor => "Minor",
      VersionBump::Patch => "Patch",
      VersionBump::Premajor => "Pre Release",
    }
  }

  /// Apply bump to a semver version
  ///
  /// Follows npm's `semver.inc`: a pre-release of the target version is
  /// promoted instead of skipped (`2.0.0-canary.0` major is `2.0.0`).
  /// Build metadata is always dropped.
  pub fn apply(&self, version: &Version, preid: &str) -> Version {
    let is_pre = !version.pre.is_empty();
    let mut next = match self {
      VersionBump::Major if is_pre && version.minor == 0 && version.patch == 0 => {
        Version::new(version.major, 0, 0)
      }
      VersionBump::Major => Version::new(version.major + 1, 0, 0),
      VersionBump::Minor if is_pre && version.patch == 0 => Version::new(version.major, version.minor, 0),
      VersionBump::Minor => Version::new(version.major, version.minor + 1, 0),
      VersionBump::Patch if is_pre => Version::new(version.major, version.minor, version.patch),
      VersionBump::Patch => Version::new(version.major, version.minor, version.patch + 1),
      VersionBump::Premajor => {
        let mut v = Version::new(version.major + 1, 0, 0);
        v.pre = prerelease(preid);
        v
      }
    };
    next.build = BuildMetadata::EMPTY;
    next
  }
}

impl fmt::Display for VersionBump {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}

fn prerelease(preid: &str) -> Prerelease {
  // An identifier that is not valid semver falls back to the default
  Prerelease::new(&format!("{}.0", preid))
    .or_else(|_| Prerelease::new(&format!("{}.0", DEFAULT_PREID)))
    .unwrap_or(Prerelease::EMPTY)
}

/// Parse a package version. Invalid input is a hard validation failure.
pub fn parse_version(input: &str) -> RepoResult<Version> {
  Version::parse(input.trim()).map_err(|e| {
    ValidationError::InvalidVersion {
      input: input.to_string(),
      reason: e.to_string(),
    }
    .into()
  })
}

/// `{name}@{version}` for independent, `v{version}` for fixed
pub fn tag_for(strategy: VersionStrategy, package_name: &str, version: &Version) -> String {
  match strategy {
    VersionStrategy::Independent => format!("{}@{}", package_name, version),
    VersionStrategy::Fixed => format!("v{}", version),
  }
}

/// Glob matching earlier tags of the same kind `tag_for` produces
pub fn tag_pattern(strategy: VersionStrategy, package_name: &str) -> String {
  match strategy {
    VersionStrategy::Independent => format!("{}@*", package_name),
    VersionStrategy::Fixed => "v*".to_string(),
  }
}

/// Single-package repositories always tag as `v{version}`
pub fn tag_strategy(layout: &RepoLayout, strategy: VersionStrategy) -> VersionStrategy {
  match layout {
    RepoLayout::Single => VersionStrategy::Fixed,
    RepoLayout::Monorepo { .. } => strategy,
  }
}

/// True iff the version has a pre-release component
pub fn is_pre_release(version: &str) -> bool {
  Version::parse(version.trim()).is_ok_and(|v| !v.pre.is_empty())
}

/// Pre-release identifier for a branch: its channel when it is a pre-release branch
pub fn prerelease_id(branch: Option<&BranchConfig>) -> String {
  branch
    .filter(|b| b.prerelease)
    .and_then(|b| b.channel.as_deref())
    .filter(|c| !c.is_empty())
    .unwrap_or(DEFAULT_PREID)
    .to_string()
}
