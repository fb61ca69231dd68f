//! Integration tests for `repo check`

use crate::helpers::{TestRepo, combined, exit_code, run_repo};
use anyhow::Result;

#[test]
fn test_check_lists_workspace_packages() -> Result<()> {
  let repo = TestRepo::monorepo("fixed", &[("api", "0.4.0"), ("ui", "1.0.0")])?;
  repo.write_file("README.md", "# acme\n")?;

  let output = run_repo(&repo.path, &["check"], "")?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert_eq!(exit_code(&output), 0, "{}", combined(&output));
  assert!(stdout.contains("Repository: acme"));
  assert!(stdout.contains("monorepo"));
  assert!(stdout.contains("fixed"));
  assert!(stdout.contains("api (0.4.0)"));
  assert!(stdout.contains("ui (1.0.0)"));
  assert!(stdout.contains("1 pending change(s)"));

  // Read-only
  assert_eq!(repo.commit_count()?, 1);
  assert!(repo.tags()?.is_empty());
  Ok(())
}

#[test]
fn test_check_single_package() -> Result<()> {
  let repo = TestRepo::single("app", "2.3.4")?;

  let output = run_repo(&repo.path, &["check"], "")?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert_eq!(exit_code(&output), 0, "{}", combined(&output));
  assert!(stdout.contains("app (2.3.4)"));
  assert!(stdout.contains("Working tree clean"));
  assert!(stdout.contains("No origin remote"));
  Ok(())
}
