//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

pub const REPOSITORY_URL: &str = "https://github.com/acme/widgets";

/// A throwaway git repository with a root package.json
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestRepo {
  /// Single-package repository with one initial commit
  pub fn single(name: &str, version: &str) -> Result<Self> {
    let repo = Self::init()?;
    repo.write_file(
      "package.json",
      &format!(
        r#"{{
  "name": "{}",
  "version": "{}",
  "release": {}
}}
"#,
        name,
        version,
        release_block("independent")
      ),
    )?;
    repo.commit("chore: initial commit")?;
    Ok(repo)
  }

  /// Workspace repository with `packages/*` members and one initial commit
  pub fn monorepo(strategy: &str, members: &[(&str, &str)]) -> Result<Self> {
    let repo = Self::init()?;
    repo.write_file(
      "package.json",
      &format!(
        r#"{{
  "name": "acme",
  "private": true,
  "workspaces": ["packages/*"],
  "release": {}
}}
"#,
        release_block(strategy)
      ),
    )?;
    for (name, version) in members {
      repo.write_file(
        &format!("packages/{}/package.json", name),
        &format!("{{\n  \"name\": \"{}\",\n  \"version\": \"{}\"\n}}\n", name, version),
      )?;
    }
    repo.commit("chore: initial commit")?;
    Ok(repo)
  }

  /// Bare git repository with `main` as the default branch
  pub fn init() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "commit.gpgsign", "false"])?;
    git(&path, &["config", "tag.gpgsign", "false"])?;

    Ok(Self { _root: root, path })
  }

  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let full = self.path.join(path);
    if let Some(parent) = full.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(full, content)?;
    Ok(())
  }

  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Stage everything and commit
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "-A"])?;
    git(&self.path, &["commit", "-m", message])?;
    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Full message of the latest commit
  pub fn last_message(&self) -> Result<String> {
    let output = git(&self.path, &["log", "-1", "--format=%B"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
  }

  pub fn commit_count(&self) -> Result<usize> {
    let output = git(&self.path, &["rev-list", "--count", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().parse()?)
  }

  pub fn tags(&self) -> Result<Vec<String>> {
    let output = git(&self.path, &["tag", "--list"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }
}

fn release_block(strategy: &str) -> String {
  format!(
    r#"{{
    "branches": [
      {{ "name": "main", "prerelease": false }},
      {{ "name": "next", "prerelease": true, "channel": "next" }}
    ],
    "repositoryUrl": "{}",
    "versionStrategy": "{}",
    "apiUrl": "http://127.0.0.1:9"
  }}"#,
    REPOSITORY_URL, strategy
  )
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the `repo` binary with scripted answers on stdin.
///
/// Unlike [`git`], a non-zero exit is returned rather than treated as an error;
/// tests assert on the exit code.
pub fn run_repo(cwd: &Path, args: &[&str], stdin: &str) -> Result<Output> {
  run_repo_with_token(cwd, args, stdin, Some("test-token"))
}

pub fn run_repo_with_token(cwd: &Path, args: &[&str], stdin: &str, token: Option<&str>) -> Result<Output> {
  let repo_bin = env!("CARGO_BIN_EXE_repo");

  let mut command = Command::new(repo_bin);
  command
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped());
  match token {
    Some(token) => command.env("GITHUB_TOKEN", token),
    None => command.env_remove("GITHUB_TOKEN"),
  };

  let mut child = command.spawn().context("Failed to run repo")?;
  if let Some(mut input) = child.stdin.take() {
    // The process may exit before reading everything
    let _ = input.write_all(stdin.as_bytes());
  }
  Ok(child.wait_with_output()?)
}

/// Exit code, or -1 when killed by a signal
pub fn exit_code(output: &Output) -> i32 {
  output.status.code().unwrap_or(-1)
}

pub fn combined(output: &Output) -> String {
  format!(
    "{}{}",
    String::from_utf8_lossy(&output.stdout),
    String::from_utf8_lossy(&output.stderr)
  )
}
