//! package.json rewriting

use super::Package;
use crate::core::error::{RepoResult, ResultExt};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// Render a manifest the way npm writes it: two-space indent, trailing newline
pub fn render(manifest: &Map<String, Value>) -> RepoResult<String> {
  let mut out = serde_json::to_string_pretty(manifest)?;
  out.push('\n');
  Ok(out)
}

/// Rewrite the package's manifest with `version`, keeping every other field
/// and its position. Returns the manifest path.
pub fn write_version(package: &Package, version: &str) -> RepoResult<PathBuf> {
  let mut manifest = package.manifest.clone();
  manifest.insert("version".to_string(), Value::String(version.to_string()));

  let path = package.manifest_path();
  let content = render(&manifest)?;
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::workspace::locator::find_single;
  use tempfile::TempDir;

  #[test]
  fn test_write_version_preserves_other_fields_and_order() {
    let dir = TempDir::new().unwrap();
    let original = "{\n  \"name\": \"ui\",\n  \"version\": \"1.0.0\",\n  \"scripts\": {\n    \"build\": \"tsc\"\n  },\n  \"private\": true\n}\n";
    fs::write(dir.path().join("package.json"), original).unwrap();

    let pkg = find_single(dir.path()).unwrap().unwrap();
    write_version(&pkg, "1.0.1").unwrap();

    let written = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert_eq!(written, original.replace("1.0.0", "1.0.1"));
  }

  #[test]
  fn test_write_version_does_not_mutate_package() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), r#"{"name":"ui","version":"1.0.0"}"#).unwrap();
    let pkg = find_single(dir.path()).unwrap().unwrap();

    write_version(&pkg, "2.0.0").unwrap();
    assert_eq!(pkg.version, "1.0.0");
    assert_eq!(find_single(dir.path()).unwrap().unwrap().version, "2.0.0");
  }
}
