//! Package locator
//!
//! `None` always means "not found". A missing root is `None`, never an empty
//! list, so callers can tell a bad root from a workspace with no packages.
//! I/O failures other than not-found propagate.

use super::{MANIFEST_FILE, Package};
use crate::core::error::{ConfigError, ConfigIssue, RepoError, RepoResult};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const NODE_MODULES: &str = "node_modules";

/// Read the package whose manifest sits directly in `dir`.
///
/// Returns `None` when the directory or manifest is missing, or when the
/// manifest lacks a non-empty `name` or `version`. A manifest that is not
/// valid JSON is a `RepoError::Manifest`.
pub fn find_single(dir: &Path) -> RepoResult<Option<Package>> {
  match fs::metadata(dir) {
    Ok(meta) if meta.is_dir() => {}
    Ok(_) => return Ok(None),
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
    Err(e) => return Err(e.into()),
  }

  let manifest_path = dir.join(MANIFEST_FILE);
  let content = match fs::read_to_string(&manifest_path) {
    Ok(content) => content,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
    Err(e) => return Err(e.into()),
  };

  let manifest: Map<String, Value> = serde_json::from_str(&content).map_err(|e| RepoError::Manifest {
    path: manifest_path.clone(),
    message: e.to_string(),
  })?;

  let name = non_empty_str(&manifest, "name");
  let version = non_empty_str(&manifest, "version");
  let (Some(name), Some(version)) = (name, version) else {
    return Ok(None);
  };

  Ok(Some(Package {
    name,
    version,
    directory: dir.to_path_buf(),
    manifest,
  }))
}

/// Expand workspace patterns relative to `root` and read every matched package.
///
/// Candidates are directories only, visited in sorted path order. Candidates
/// without a usable manifest are skipped. When two candidates share a name the
/// first one wins.
pub fn find_workspace_members(root: &Path, patterns: &[String]) -> RepoResult<Option<Vec<Package>>> {
  match fs::metadata(root) {
    Ok(meta) if meta.is_dir() => {}
    Ok(_) => return Ok(None),
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
    Err(e) => return Err(e.into()),
  }

  let mut candidates = BTreeSet::new();
  for pattern in patterns {
    candidates.extend(expand_pattern(root, pattern)?);
  }

  let mut seen = HashSet::new();
  let mut packages = Vec::new();
  for dir in candidates {
    match find_single(&dir) {
      Ok(Some(pkg)) => {
        if !seen.insert(pkg.name.clone()) {
          warn!(name = %pkg.name, dir = %dir.display(), "duplicate package name, skipping");
          continue;
        }
        packages.push(pkg);
      }
      Ok(None) => debug!(dir = %dir.display(), "no package manifest, skipping"),
      Err(RepoError::Manifest { path, message }) => {
        warn!(path = %path.display(), %message, "invalid package manifest, skipping");
      }
      Err(e) => return Err(e),
    }
  }

  Ok(Some(packages))
}

/// Directories matched by one workspace pattern
fn expand_pattern(root: &Path, pattern: &str) -> RepoResult<Vec<PathBuf>> {
  let pattern = pattern.trim_start_matches("./").trim_end_matches('/');
  let root_str = glob::Pattern::escape(&root.to_string_lossy());
  let full = format!("{}/{}", root_str.trim_end_matches('/'), pattern);

  let paths = glob::glob(&full).map_err(|e| {
    RepoError::Config(ConfigError::Invalid {
      issues: vec![ConfigIssue::new("workspaces", format!("Invalid pattern '{}': {}", pattern, e))],
    })
  })?;

  let mut dirs = Vec::new();
  for entry in paths {
    let path = entry.map_err(|e| RepoError::Io(e.into()))?;
    if path.is_dir() && !is_installed_dependency(root, &path) {
      dirs.push(path);
    }
  }
  Ok(dirs)
}

/// Anything under a `node_modules` directory is an installed dependency, never a member
fn is_installed_dependency(root: &Path, path: &Path) -> bool {
  path
    .strip_prefix(root)
    .unwrap_or(path)
    .components()
    .any(|c| c.as_os_str() == NODE_MODULES)
}

fn non_empty_str(manifest: &Map<String, Value>, key: &str) -> Option<String> {
  manifest
    .get(key)
    .and_then(Value::as_str)
    .filter(|s| !s.trim().is_empty())
    .map(String::from)
}
