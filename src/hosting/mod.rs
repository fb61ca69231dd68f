//! Hosted-repository collaborator
//!
//! The release workflow publishes through [`ReleasePublisher`]; the GitHub REST
//! client is the only real implementation.

pub mod github;

pub use github::GithubClient;

use crate::core::error::{HostingError, RepoResult};
use serde::Serialize;

/// Body of a create-release call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRequest {
  pub tag_name: String,
  pub name: String,
  pub body: String,
  pub draft: bool,
  pub prerelease: bool,
}

/// Anything that can publish a hosted release record
pub trait ReleasePublisher {
  fn create_release(&self, request: &ReleaseRequest) -> RepoResult<()>;
}

/// Owner and repository name from `https://host/owner/repo(.git)` or
/// `git@host:owner/repo(.git)`
pub fn parse_repository(url: &str) -> Result<(String, String), HostingError> {
  let invalid = || HostingError::InvalidRepositoryUrl { url: url.to_string() };

  let path = if let Some(rest) = url.strip_prefix("https://").or_else(|| url.strip_prefix("http://")) {
    rest.split_once('/').map(|(_, path)| path).ok_or_else(invalid)?
  } else if let Some(rest) = url.strip_prefix("git@") {
    rest.split_once(':').map(|(_, path)| path).ok_or_else(invalid)?
  } else {
    return Err(invalid());
  };

  let mut segments = path.trim_end_matches('/').split('/').filter(|s| !s.is_empty());
  let owner = segments.next().ok_or_else(invalid)?;
  let repo = segments.next().ok_or_else(invalid)?;
  let repo = repo.strip_suffix(".git").unwrap_or(repo);
  if repo.is_empty() {
    return Err(invalid());
  }

  Ok((owner.to_string(), repo.to_string()))
}
