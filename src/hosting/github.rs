//! GitHub REST client for release records

use super::{ReleasePublisher, ReleaseRequest, parse_repository};
use crate::core::config::RepoConfig;
use crate::core::error::{HostingError, RepoResult};
use std::time::Duration;
use tracing::debug;

const TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("repo-cli/", env!("CARGO_PKG_VERSION"));

pub struct GithubClient {
  api_url: String,
  owner: String,
  repo: String,
  token: String,
  agent: ureq::Agent,
}

impl GithubClient {
  pub fn new(api_url: &str, repository_url: &str, token: &str) -> RepoResult<Self> {
    let (owner, repo) = parse_repository(repository_url)?;
    let agent = ureq::Agent::config_builder()
      .timeout_global(Some(TIMEOUT))
      .http_status_as_error(false)
      .build()
      .new_agent();

    Ok(Self {
      api_url: api_url.trim_end_matches('/').to_string(),
      owner,
      repo,
      token: token.to_string(),
      agent,
    })
  }

  pub fn from_config(config: &RepoConfig) -> RepoResult<Self> {
    Self::new(&config.release.api_url, &config.release.repository_url, &config.github_token)
  }

  fn releases_url(&self) -> String {
    format!("{}/repos/{}/{}/releases", self.api_url, self.owner, self.repo)
  }
}

impl ReleasePublisher for GithubClient {
  fn create_release(&self, request: &ReleaseRequest) -> RepoResult<()> {
    let url = self.releases_url();
    let payload = serde_json::to_string(request)?;
    debug!(%url, tag = %request.tag_name, draft = request.draft, "creating release");

    let mut response = self
      .agent
      .post(&url)
      .header("Authorization", &format!("Bearer {}", self.token))
      .header("Accept", "application/vnd.github+json")
      .header("X-GitHub-Api-Version", "2022-11-28")
      .header("User-Agent", USER_AGENT)
      .header("Content-Type", "application/json")
      .send(payload)
      .map_err(|e| HostingError::Request { message: e.to_string() })?;

    let status = response.status().as_u16();
    debug!(status, "release response");
    if status == 201 {
      return Ok(());
    }

    let body = response.body_mut().read_to_string().unwrap_or_default();
    Err(HostingError::Status { status, body }.into())
  }
}
