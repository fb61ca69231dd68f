//! Version control collaborator
//!
//! Workflows talk to git only through the [`Vcs`] trait so they can be driven
//! by an in-memory fake in tests. [`SystemGit`] is the real implementation.

pub mod system_git;
mod system_git_ops;

pub use system_git::SystemGit;

use crate::core::error::RepoResult;
use std::path::PathBuf;

/// Remote used for sync checks and pushes
pub const DEFAULT_REMOTE: &str = "origin";

/// Information about a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
  pub hash: String,
  /// Subject line of the commit message
  pub message: String,
  pub author_name: String,
}

impl CommitInfo {
  pub fn new(hash: impl Into<String>, message: impl Into<String>, author_name: impl Into<String>) -> Self {
    Self {
      hash: hash.into(),
      message: message.into(),
      author_name: author_name.into(),
    }
  }
}

/// Working tree state relative to HEAD and the upstream branch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoStatus {
  /// Paths with staged, unstaged or untracked changes
  pub changed_files: Vec<String>,
  /// Commits on the local branch not on its upstream
  pub ahead: usize,
  /// Commits on the upstream not on the local branch
  pub behind: usize,
}

impl RepoStatus {
  pub fn is_clean(&self) -> bool {
    self.changed_files.is_empty()
  }
}

/// Narrow git interface consumed by the workflows
pub trait Vcs {
  /// True when the working directory is inside a git work tree
  fn is_repository(&self) -> bool;

  fn status(&self) -> RepoResult<RepoStatus>;

  fn current_branch(&self) -> RepoResult<String>;

  fn has_remote(&self, name: &str) -> RepoResult<bool>;

  fn fetch(&self, remote: &str) -> RepoResult<()>;

  /// Pull the upstream of the current branch
  fn pull(&self) -> RepoResult<()>;

  fn stage_all(&self) -> RepoResult<()>;

  /// Stage only the given paths (relative to the repository root or absolute)
  fn stage_paths(&self, paths: &[PathBuf]) -> RepoResult<()>;

  fn commit(&self, message: &str) -> RepoResult<()>;

  fn push(&self, remote: &str, branch: &str) -> RepoResult<()>;

  /// Most recent tag reachable from HEAD matching a glob, if any
  fn latest_tag(&self, pattern: &str) -> RepoResult<Option<String>>;

  /// Commits after `since` up to HEAD, newest first. `None` means all history.
  fn log_since(&self, since: Option<&str>) -> RepoResult<Vec<CommitInfo>>;

  fn add_annotated_tag(&self, name: &str, message: &str) -> RepoResult<()>;

  fn push_tags(&self, remote: &str) -> RepoResult<()>;
}
