//! Repository configuration embedded in the root package.json
//!
//! The root manifest carries the project name, the optional `workspaces`
//! patterns and a `release` block. Validation collects every issue with its
//! dotted field path instead of stopping at the first one.

use crate::core::error::{ConfigError, ConfigIssue, RepoResult};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Default hosting API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Name of the token variable, also used as its dotted config path under `env.`
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// File consulted for the token when the environment has none
pub const ENV_FILE: &str = ".env.local";

/// How packages are laid out in the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoLayout {
  /// The root manifest is the only package
  Single,
  /// Packages live in directories matched by workspace patterns
  Monorepo { patterns: Vec<String> },
}

/// Whether workspace packages share one version and tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStrategy {
  #[default]
  Independent,
  Fixed,
}

impl VersionStrategy {
  pub fn as_str(&self) -> &'static str {
    match self {
      VersionStrategy::Independent => "independent",
      VersionStrategy::Fixed => "fixed",
    }
  }
}

/// A branch releases may be cut from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchConfig {
  pub name: String,
  pub prerelease: bool,
  pub channel: Option<String>,
}

/// The `release` block
#[derive(Debug, Clone)]
pub struct ReleaseSettings {
  pub branches: Vec<BranchConfig>,
  pub repository_url: String,
  pub version_strategy: VersionStrategy,
  pub api_url: String,
}

/// Validated repository configuration, immutable for the rest of the run
#[derive(Debug, Clone)]
pub struct RepoConfig {
  pub name: String,
  pub layout: RepoLayout,
  pub release: ReleaseSettings,
  pub github_token: String,
}

impl RepoConfig {
  /// Load and validate the configuration from `root/package.json`.
  ///
  /// `env_token` is the process value of `GITHUB_TOKEN`; when absent or empty
  /// the token is read from `root/.env.local`.
  pub fn load(root: &Path, env_token: Option<String>) -> RepoResult<Self> {
    let manifest_path = root.join("package.json");
    let content = match fs::read_to_string(&manifest_path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Err(ConfigError::ManifestNotFound { path: manifest_path }.into());
      }
      Err(e) => return Err(e.into()),
    };

    let value: Value = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
      path: manifest_path.clone(),
      message: e.to_string(),
    })?;

    let token = resolve_token(root, env_token)?;
    debug!(path = %manifest_path.display(), token_found = token.is_some(), "loaded root manifest");

    Self::from_value(&value, token).map_err(|issues| ConfigError::Invalid { issues }.into())
  }

  /// Validate a parsed root manifest, collecting every issue
  pub fn from_value(value: &Value, token: Option<String>) -> Result<Self, Vec<ConfigIssue>> {
    let mut issues = Vec::new();
    let empty = Map::new();
    let root = match value.as_object() {
      Some(obj) => obj,
      None => {
        issues.push(ConfigIssue::new("(root)", "Expected object"));
        &empty
      }
    };

    let name = required_string(root, "name", "name", &mut issues);
    let layout = parse_layout(root.get("workspaces"), &mut issues);
    let release = parse_release(root.get("release"), &mut issues);

    let github_token = match token {
      Some(t) if !t.trim().is_empty() => Some(t),
      _ => {
        issues.push(ConfigIssue::new(format!("env.{}", TOKEN_VAR), "Required"));
        None
      }
    };

    match (name, layout, release, github_token) {
      (Some(name), Some(layout), Some(release), Some(github_token)) if issues.is_empty() => Ok(Self {
        name,
        layout,
        release,
        github_token,
      }),
      _ => Err(issues),
    }
  }

  pub fn is_monorepo(&self) -> bool {
    matches!(self.layout, RepoLayout::Monorepo { .. })
  }

  /// First non-prerelease branch, or the first configured branch
  pub fn default_branch(&self) -> &str {
    let branches = &self.release.branches;
    branches
      .iter()
      .find(|b| !b.prerelease)
      .or_else(|| branches.first())
      .map(|b| b.name.as_str())
      .unwrap_or("main")
  }

  /// Look up a configured release branch by name
  pub fn branch(&self, name: &str) -> Option<&BranchConfig> {
    self.release.branches.iter().find(|b| b.name == name)
  }

  pub fn layout_label(&self) -> &'static str {
    match self.layout {
      RepoLayout::Single => "single",
      RepoLayout::Monorepo { .. } => "monorepo",
    }
  }
}

/// Token from the environment, else from `.env.local` in the root
fn resolve_token(root: &Path, env_token: Option<String>) -> RepoResult<Option<String>> {
  if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
    return Ok(Some(token));
  }

  let env_file = root.join(ENV_FILE);
  if !env_file.is_file() {
    return Ok(None);
  }

  let iter = dotenvy::from_path_iter(&env_file).map_err(|e| ConfigError::Parse {
    path: env_file.clone(),
    message: e.to_string(),
  })?;
  for item in iter {
    let (key, value) = item.map_err(|e| ConfigError::Parse {
      path: env_file.clone(),
      message: e.to_string(),
    })?;
    if key == TOKEN_VAR && !value.trim().is_empty() {
      return Ok(Some(value));
    }
  }
  Ok(None)
}

fn required_string(obj: &Map<String, Value>, key: &str, path: &str, issues: &mut Vec<ConfigIssue>) -> Option<String> {
  match obj.get(key) {
    None | Some(Value::Null) => {
      issues.push(ConfigIssue::new(path, "Required"));
      None
    }
    Some(Value::String(s)) if s.trim().is_empty() => {
      issues.push(ConfigIssue::new(path, "Must not be empty"));
      None
    }
    Some(Value::String(s)) => Some(s.clone()),
    Some(_) => {
      issues.push(ConfigIssue::new(path, "Expected string"));
      None
    }
  }
}

fn parse_layout(workspaces: Option<&Value>, issues: &mut Vec<ConfigIssue>) -> Option<RepoLayout> {
  let (patterns, path) = match workspaces {
    None | Some(Value::Null) => return Some(RepoLayout::Single),
    Some(Value::Array(items)) => (items, "workspaces"),
    Some(Value::Object(obj)) => match obj.get("packages") {
      Some(Value::Array(items)) => (items, "workspaces.packages"),
      _ => {
        issues.push(ConfigIssue::new("workspaces.packages", "Expected array of patterns"));
        return None;
      }
    },
    Some(_) => {
      issues.push(ConfigIssue::new("workspaces", "Expected array of patterns"));
      return None;
    }
  };

  let mut out = Vec::with_capacity(patterns.len());
  let mut ok = true;
  for (i, item) in patterns.iter().enumerate() {
    match item.as_str() {
      Some(p) if !p.trim().is_empty() => out.push(p.to_string()),
      _ => {
        issues.push(ConfigIssue::new(format!("{}.{}", path, i), "Expected non-empty string"));
        ok = false;
      }
    }
  }
  ok.then_some(RepoLayout::Monorepo { patterns: out })
}

fn parse_release(release: Option<&Value>, issues: &mut Vec<ConfigIssue>) -> Option<ReleaseSettings> {
  let obj = match release {
    Some(Value::Object(obj)) => obj,
    None | Some(Value::Null) => {
      issues.push(ConfigIssue::new("release", "Required"));
      return None;
    }
    Some(_) => {
      issues.push(ConfigIssue::new("release", "Expected object"));
      return None;
    }
  };

  let before = issues.len();
  let branches = parse_branches(obj.get("branches"), issues);

  let repository_url = required_string(obj, "repositoryUrl", "release.repositoryUrl", issues);
  if let Some(url) = &repository_url
    && !is_repository_url(url)
  {
    issues.push(ConfigIssue::new("release.repositoryUrl", "Invalid url"));
  }

  let version_strategy = match obj.get("versionStrategy") {
    None | Some(Value::Null) => VersionStrategy::default(),
    Some(v) => match serde_json::from_value::<VersionStrategy>(v.clone()) {
      Ok(s) => s,
      Err(_) => {
        issues.push(ConfigIssue::new(
          "release.versionStrategy",
          "Expected 'independent' | 'fixed'",
        ));
        VersionStrategy::default()
      }
    },
  };

  let api_url = match obj.get("apiUrl") {
    None | Some(Value::Null) => DEFAULT_API_URL.to_string(),
    Some(Value::String(s)) if s.starts_with("http://") || s.starts_with("https://") => {
      s.trim_end_matches('/').to_string()
    }
    Some(_) => {
      issues.push(ConfigIssue::new("release.apiUrl", "Invalid url"));
      DEFAULT_API_URL.to_string()
    }
  };

  if issues.len() != before {
    return None;
  }

  Some(ReleaseSettings {
    branches: branches?,
    repository_url: repository_url?,
    version_strategy,
    api_url,
  })
}

fn parse_branches(value: Option<&Value>, issues: &mut Vec<ConfigIssue>) -> Option<Vec<BranchConfig>> {
  let items = match value {
    Some(Value::Array(items)) if !items.is_empty() => items,
    Some(Value::Array(_)) => {
      issues.push(ConfigIssue::new("release.branches", "Must contain at least 1 element"));
      return None;
    }
    None | Some(Value::Null) => {
      issues.push(ConfigIssue::new("release.branches", "Required"));
      return None;
    }
    Some(_) => {
      issues.push(ConfigIssue::new("release.branches", "Expected array"));
      return None;
    }
  };

  let before = issues.len();
  let mut branches = Vec::with_capacity(items.len());
  for (i, item) in items.iter().enumerate() {
    let path = format!("release.branches.{}", i);
    let Some(obj) = item.as_object() else {
      issues.push(ConfigIssue::new(path, "Expected object"));
      continue;
    };

    let name = required_string(obj, "name", &format!("{}.name", path), issues);
    let prerelease = match obj.get("prerelease") {
      Some(Value::Bool(b)) => *b,
      None => {
        issues.push(ConfigIssue::new(format!("{}.prerelease", path), "Required"));
        false
      }
      Some(_) => {
        issues.push(ConfigIssue::new(format!("{}.prerelease", path), "Expected boolean"));
        false
      }
    };
    let channel = match obj.get("channel") {
      None | Some(Value::Null) => None,
      Some(Value::String(s)) => Some(s.clone()),
      Some(_) => {
        issues.push(ConfigIssue::new(format!("{}.channel", path), "Expected string"));
        None
      }
    };

    if let Some(name) = name {
      branches.push(BranchConfig {
        name,
        prerelease,
        channel,
      });
    }
  }

  (issues.len() == before).then_some(branches)
}

/// `http(s)://host/...` or scp-like `git@host:owner/repo`
fn is_repository_url(url: &str) -> bool {
  if let Some(rest) = url.strip_prefix("https://").or_else(|| url.strip_prefix("http://")) {
    return rest.split('/').next().is_some_and(|host| !host.is_empty());
  }
  if let Some(rest) = url.strip_prefix("git@") {
    return rest.split_once(':').is_some_and(|(host, path)| !host.is_empty() && path.contains('/'));
  }
  false
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use tempfile::TempDir;

  fn valid_manifest() -> Value {
    json!({
      "name": "acme",
      "version": "1.0.0",
      "release": {
        "branches": [{ "name": "next", "prerelease": true, "channel": "next" }, { "name": "main", "prerelease": false }],
        "repositoryUrl": "https://github.com/acme/acme"
      }
    })
  }

  fn issue_paths(value: &Value, token: Option<&str>) -> Vec<String> {
    RepoConfig::from_value(value, token.map(String::from))
      .unwrap_err()
      .into_iter()
      .map(|i| i.path)
      .collect()
  }

  #[test]
  fn test_single_layout_without_workspaces() {
    let config = RepoConfig::from_value(&valid_manifest(), Some("t".into())).unwrap();
    assert_eq!(config.layout, RepoLayout::Single);
    assert_eq!(config.release.version_strategy, VersionStrategy::Independent);
    assert_eq!(config.release.api_url, DEFAULT_API_URL);
    assert!(!config.is_monorepo());
  }

  #[test]
  fn test_workspaces_array_and_object_forms() {
    let mut manifest = valid_manifest();
    manifest["workspaces"] = json!(["packages/*"]);
    let config = RepoConfig::from_value(&manifest, Some("t".into())).unwrap();
    assert_eq!(
      config.layout,
      RepoLayout::Monorepo {
        patterns: vec!["packages/*".to_string()]
      }
    );

    manifest["workspaces"] = json!({ "packages": ["apps/*", "libs/*"] });
    let config = RepoConfig::from_value(&manifest, Some("t".into())).unwrap();
    assert!(config.is_monorepo());
  }

  #[test]
  fn test_default_branch_skips_prerelease() {
    let config = RepoConfig::from_value(&valid_manifest(), Some("t".into())).unwrap();
    assert_eq!(config.default_branch(), "main");
    assert_eq!(config.branch("next").and_then(|b| b.channel.as_deref()), Some("next"));
  }

  #[test]
  fn test_collects_every_issue_with_paths() {
    let manifest = json!({
      "release": {
        "branches": [],
        "repositoryUrl": "not a url",
        "versionStrategy": "sometimes"
      }
    });
    let paths = issue_paths(&manifest, None);
    assert_eq!(
      paths,
      vec![
        "name",
        "release.branches",
        "release.repositoryUrl",
        "release.versionStrategy",
        "env.GITHUB_TOKEN"
      ]
    );
  }

  #[test]
  fn test_branch_entry_paths() {
    let mut manifest = valid_manifest();
    manifest["release"]["branches"] = json!([{ "name": "" , "prerelease": "yes" }]);
    let paths = issue_paths(&manifest, Some("t"));
    assert_eq!(paths, vec!["release.branches.0.name", "release.branches.0.prerelease"]);
  }

  #[test]
  fn test_ssh_repository_url_accepted() {
    assert!(is_repository_url("git@github.com:acme/acme.git"));
    assert!(is_repository_url("https://github.com/acme/acme"));
    assert!(!is_repository_url("github.com/acme/acme"));
    assert!(!is_repository_url("git@github.com"));
  }

  #[test]
  fn test_load_reads_token_from_env_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), valid_manifest().to_string()).unwrap();
    fs::write(dir.path().join(ENV_FILE), "OTHER=1\nGITHUB_TOKEN=from-file\n").unwrap();

    let config = RepoConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.github_token, "from-file");

    let config = RepoConfig::load(dir.path(), Some("from-env".into())).unwrap();
    assert_eq!(config.github_token, "from-env");
  }

  #[test]
  fn test_load_missing_manifest() {
    let dir = TempDir::new().unwrap();
    let err = RepoConfig::load(dir.path(), Some("t".into())).unwrap_err();
    assert!(matches!(
      err,
      crate::core::error::RepoError::Config(ConfigError::ManifestNotFound { .. })
    ));
  }

  #[test]
  fn test_load_invalid_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), "{ nope").unwrap();
    let err = RepoConfig::load(dir.path(), Some("t".into())).unwrap_err();
    assert!(matches!(
      err,
      crate::core::error::RepoError::Config(ConfigError::Parse { .. })
    ));
  }
}
