//! Package discovery for single-package and workspace repositories
//!
//! - **locator**: find the package at a directory or every workspace member
//! - **manifest**: rewrite a package.json with a new version

pub mod locator;
pub mod manifest;

use crate::core::config::RepoLayout;
use crate::core::error::{RepoResult, ValidationError};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Manifest file name for every package
pub const MANIFEST_FILE: &str = "package.json";

/// One discovered package. Built fresh on every discovery call.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
  pub name: String,
  pub version: String,
  /// Absolute package directory
  pub directory: PathBuf,
  /// Full manifest document, key order preserved
  pub manifest: Map<String, Value>,
}

impl Package {
  pub fn manifest_path(&self) -> PathBuf {
    self.directory.join(MANIFEST_FILE)
  }
}

/// Discover the packages of a repository according to its layout.
///
/// Fails with `NoPackages` when the root is missing or nothing was found.
pub fn discover(root: &Path, layout: &RepoLayout) -> RepoResult<Vec<Package>> {
  let packages = match layout {
    RepoLayout::Single => locator::find_single(root)?.map(|p| vec![p]),
    RepoLayout::Monorepo { patterns } => locator::find_workspace_members(root, patterns)?,
  };

  match packages {
    Some(packages) if !packages.is_empty() => Ok(packages),
    _ => Err(ValidationError::NoPackages.into()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::error::RepoError;
  use std::fs;
  use tempfile::TempDir;

  #[test]
  fn test_discover_single() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(MANIFEST_FILE), r#"{"name":"app","version":"1.2.3"}"#).unwrap();

    let packages = discover(dir.path(), &RepoLayout::Single).unwrap();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].name, "app");
  }

  #[test]
  fn test_discover_empty_workspace_is_no_packages() {
    let dir = TempDir::new().unwrap();
    let layout = RepoLayout::Monorepo {
      patterns: vec!["packages/*".to_string()],
    };
    let err = discover(dir.path(), &layout).unwrap_err();
    assert!(matches!(err, RepoError::Validation(ValidationError::NoPackages)));
  }
}
