//! Integration tests for `repo commit`

use crate::helpers::{TestRepo, combined, exit_code, run_repo};
use anyhow::Result;

#[test]
fn test_commit_feat_single_package() -> Result<()> {
  let repo = TestRepo::single("app", "1.0.0")?;
  repo.write_file("src/login.ts", "export const login = () => {};\n")?;

  // continue, type 1 (feat), short, long, breaking, push
  let output = run_repo(&repo.path, &["commit"], "y\n1\nadd login\n\nn\nn\n")?;

  assert_eq!(exit_code(&output), 0, "{}", combined(&output));
  assert_eq!(repo.last_message()?, "feat: add login");
  assert_eq!(repo.commit_count()?, 2);
  assert!(combined(&output).contains("Commit completed successfully"));
  Ok(())
}

#[test]
fn test_commit_monorepo_independent_scopes_to_package() -> Result<()> {
  let repo = TestRepo::monorepo("independent", &[("api", "0.4.0"), ("ui", "1.0.0")])?;
  repo.write_file("packages/ui/button.tsx", "export {};\n")?;

  // continue, package 2 (ui), type 2 (fix), short, long, breaking, push
  let output = run_repo(&repo.path, &["commit"], "y\n2\n2\nfocus ring\n\nn\nn\n")?;

  assert_eq!(exit_code(&output), 0, "{}", combined(&output));
  assert_eq!(repo.last_message()?, "fix(ui): focus ring");
  Ok(())
}

#[test]
fn test_commit_breaking_change_footer() -> Result<()> {
  let repo = TestRepo::single("app", "1.0.0")?;
  repo.write_file("src/api.ts", "export {};\n")?;

  let output = run_repo(
    &repo.path,
    &["commit"],
    "y\n1\nnew api\nRewrites the client.\ny\nold client removed\nn\n",
  )?;

  assert_eq!(exit_code(&output), 0, "{}", combined(&output));
  assert_eq!(
    repo.last_message()?,
    "feat: new api\n\nRewrites the client.\n\nBREAKING CHANGES: old client removed"
  );
  Ok(())
}

#[test]
fn test_commit_without_changes_exits_zero() -> Result<()> {
  let repo = TestRepo::single("app", "1.0.0")?;

  let output = run_repo(&repo.path, &["commit"], "")?;

  assert_eq!(exit_code(&output), 0);
  assert!(combined(&output).contains("No changes detected"));
  assert_eq!(repo.commit_count()?, 1);
  Ok(())
}

#[test]
fn test_commit_cancel_on_end_of_input() -> Result<()> {
  let repo = TestRepo::single("app", "1.0.0")?;
  repo.write_file("notes.md", "draft\n")?;

  // Input ends at the type prompt
  let output = run_repo(&repo.path, &["commit"], "y\n")?;

  assert_eq!(exit_code(&output), 0, "{}", combined(&output));
  assert!(combined(&output).contains("cancelled"));
  assert_eq!(repo.commit_count()?, 1);
  Ok(())
}

#[test]
fn test_commit_outside_repository_exits_zero() -> Result<()> {
  let dir = tempfile::TempDir::new()?;
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

  let output = run_repo(dir.path(), &["commit"], "")?;

  assert_eq!(exit_code(&output), 0);
  assert!(combined(&output).contains("Not a git repository"));
  Ok(())
}
