//! Integration tests for `repo release`
//!
//! None of these reach GitHub: each scenario stops at a precondition, or
//! publishes against an unreachable API URL after the tag push.

use crate::helpers::{TestRepo, combined, exit_code, git, run_repo, run_repo_with_token};
use anyhow::Result;
use tempfile::TempDir;

/// Bare repository wired up as `origin`, with `main` pushed
fn add_origin(repo: &TestRepo) -> Result<TempDir> {
  let remote = TempDir::new()?;
  git(remote.path(), &["init", "--bare", "--initial-branch=main"])?;
  let url = remote.path().to_string_lossy().to_string();
  git(&repo.path, &["remote", "add", "origin", &url])?;
  git(&repo.path, &["push", "-u", "origin", "main"])?;
  Ok(remote)
}

#[test]
fn test_release_dirty_tree_exits_one() -> Result<()> {
  let repo = TestRepo::single("app", "1.0.0")?;
  repo.write_file("wip.txt", "unfinished\n")?;

  let output = run_repo(&repo.path, &["release"], "")?;

  assert_eq!(exit_code(&output), 1);
  assert!(combined(&output).contains("Commit changes before releasing"));
  assert!(repo.tags()?.is_empty());
  Ok(())
}

#[test]
fn test_release_invalid_config_names_field() -> Result<()> {
  let repo = TestRepo::init()?;
  repo.write_file(
    "package.json",
    r#"{
  "name": "app",
  "version": "1.0.0",
  "release": { "branches": [{ "name": "main", "prerelease": false }] }
}
"#,
  )?;
  repo.commit("chore: initial commit")?;

  let output = run_repo(&repo.path, &["release"], "")?;

  assert_eq!(exit_code(&output), 1);
  assert!(combined(&output).contains("release.repositoryUrl"));
  Ok(())
}

#[test]
fn test_release_requires_token() -> Result<()> {
  let repo = TestRepo::single("app", "1.0.0")?;

  let output = run_repo_with_token(&repo.path, &["release"], "", None)?;

  assert_eq!(exit_code(&output), 1);
  assert!(combined(&output).contains("GITHUB_TOKEN"));
  Ok(())
}

#[test]
fn test_release_outside_repository_exits_one() -> Result<()> {
  let dir = TempDir::new()?;
  std::fs::write(
    dir.path().join("package.json"),
    r#"{
  "name": "app",
  "version": "1.0.0",
  "release": {
    "branches": [{ "name": "main", "prerelease": false }],
    "repositoryUrl": "https://github.com/acme/widgets"
  }
}
"#,
  )?;

  let output = run_repo(dir.path(), &["release"], "")?;

  assert_eq!(exit_code(&output), 1);
  assert!(combined(&output).contains("Not a git repository"));
  Ok(())
}

#[test]
fn test_release_from_unconfigured_branch() -> Result<()> {
  let repo = TestRepo::single("app", "1.0.0")?;
  git(&repo.path, &["checkout", "-b", "feature/login"])?;

  let output = run_repo(&repo.path, &["release"], "")?;

  assert_eq!(exit_code(&output), 1);
  assert!(combined(&output).contains("feature/login"));
  assert!(repo.tags()?.is_empty());
  Ok(())
}

#[test]
fn test_release_monorepo_package_without_relevant_commits() -> Result<()> {
  let repo = TestRepo::monorepo("independent", &[("api", "0.4.0"), ("ui", "1.0.0")])?;
  repo.write_file("packages/api/index.js", "module.exports = {};\n")?;
  repo.commit("fix(api): y")?;

  // package 2 (ui), bump 1 (major), no draft, continue
  let output = run_repo(&repo.path, &["release"], "2\n1\nn\ny\n")?;

  assert_eq!(exit_code(&output), 1, "{}", combined(&output));
  assert!(combined(&output).contains("No commits mention 'ui'"));
  assert!(repo.tags()?.is_empty());
  assert!(repo.read_file("packages/ui/package.json")?.contains("\"1.0.0\""));
  Ok(())
}

#[test]
fn test_release_cancel_exits_one_without_tag() -> Result<()> {
  let repo = TestRepo::single("app", "1.0.0")?;

  // Input ends at the bump prompt
  let output = run_repo(&repo.path, &["release"], "")?;

  assert_eq!(exit_code(&output), 1);
  assert!(combined(&output).contains("cancelled"));
  assert!(repo.tags()?.is_empty());
  Ok(())
}

#[test]
fn test_release_declined_confirmation_is_cancel() -> Result<()> {
  let repo = TestRepo::single("app", "1.0.0")?;
  repo.write_file("src/index.js", "export {};\n")?;
  repo.commit("feat: add index")?;

  // bump 2 (minor), no draft, do not continue
  let output = run_repo(&repo.path, &["release"], "2\nn\nn\n")?;

  assert_eq!(exit_code(&output), 1);
  assert!(repo.tags()?.is_empty());
  assert_eq!(repo.commit_count()?, 2);
  Ok(())
}

#[test]
fn test_release_publish_failure_keeps_pushed_tag() -> Result<()> {
  let repo = TestRepo::single("app", "1.0.0")?;
  let _origin = add_origin(&repo)?;
  repo.write_file("src/index.js", "export {};\n")?;
  repo.commit("feat: add index")?;
  git(&repo.path, &["push", "origin", "main"])?;

  // bump 2 (minor), no draft, continue
  let output = run_repo(&repo.path, &["release"], "2\nn\ny\n")?;
  let text = combined(&output);

  assert_eq!(exit_code(&output), 2, "{}", text);
  assert_eq!(repo.tags()?, vec!["v1.1.0".to_string()]);
  assert!(text.contains("git push origin --delete v1.1.0"));

  // Nothing after the publish step ran
  assert!(repo.read_file("package.json")?.contains("\"1.0.0\""));
  assert!(!repo.file_exists("CHANGELOG.md"));
  Ok(())
}
