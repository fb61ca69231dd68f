//! `repo check` - read-only repository diagnostics
//!
//! Prints what the commit and release flows would see: configuration, branch,
//! working tree and remote state, and the discovered packages. Never mutates.

use crate::core::context::RepoContext;
use crate::core::error::{RepoError, RepoResult, ValidationError};
use crate::core::vcs::{DEFAULT_REMOTE, RepoStatus, SystemGit, Vcs};
use crate::workspace::{self, Package};
use std::fmt;

/// Snapshot of the repository state
#[derive(Debug, Clone)]
pub struct CheckReport {
  pub name: String,
  pub layout: &'static str,
  pub strategy: &'static str,
  pub default_branch: String,
  pub current_branch: String,
  pub releasable: bool,
  pub has_origin: bool,
  pub status: RepoStatus,
  pub packages: Vec<(String, String)>,
}

/// Collect the report. Fails only when the directory is not a repository.
pub fn collect(ctx: &RepoContext, vcs: &dyn Vcs) -> RepoResult<CheckReport> {
  if !vcs.is_repository() {
    return Err(ValidationError::NotARepository.into());
  }

  let config = &ctx.config;
  let current_branch = vcs.current_branch()?;
  let packages = match workspace::discover(&ctx.root, &config.layout) {
    Ok(packages) => packages,
    Err(RepoError::Validation(ValidationError::NoPackages)) => Vec::new(),
    Err(e) => return Err(e),
  };

  Ok(CheckReport {
    name: config.name.clone(),
    layout: config.layout_label(),
    strategy: config.release.version_strategy.as_str(),
    default_branch: config.default_branch().to_string(),
    releasable: config.branch(&current_branch).is_some(),
    current_branch,
    has_origin: vcs.has_remote(DEFAULT_REMOTE)?,
    status: vcs.status()?,
    packages: packages.into_iter().map(|Package { name, version, .. }| (name, version)).collect(),
  })
}

impl fmt::Display for CheckReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "📦 Repository: {}", self.name)?;
    writeln!(f, "   layout:   {}", self.layout)?;
    writeln!(f, "   strategy: {}", self.strategy)?;
    writeln!(f)?;
    writeln!(f, "🌿 Branch: {}", self.current_branch)?;
    writeln!(f, "   default branch: {}", self.default_branch)?;
    writeln!(
      f,
      "   releases: {}",
      if self.releasable { "allowed" } else { "not configured for this branch" }
    )?;
    writeln!(f)?;

    if self.status.is_clean() {
      writeln!(f, "✅ Working tree clean")?;
    } else {
      writeln!(f, "📝 {} pending change(s)", self.status.changed_files.len())?;
    }
    if self.has_origin {
      writeln!(f, "🔄 {} ahead, {} behind {}", self.status.ahead, self.status.behind, DEFAULT_REMOTE)?;
    } else {
      writeln!(f, "🔄 No {} remote", DEFAULT_REMOTE)?;
    }
    writeln!(f)?;

    if self.packages.is_empty() {
      writeln!(f, "⚠️  No packages found")?;
    } else {
      writeln!(f, "📚 Packages ({}):", self.packages.len())?;
      for (name, version) in &self.packages {
        writeln!(f, "   {} ({})", name, version)?;
      }
    }
    Ok(())
  }
}

/// Run the check command
pub fn run_check(ctx: &RepoContext) -> RepoResult<()> {
  let git = SystemGit::new(&ctx.root);
  let report = collect(ctx, &git)?;
  print!("{}", report);
  Ok(())
}
