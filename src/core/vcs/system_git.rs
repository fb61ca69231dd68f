//! System git backend
//!
//! Every operation is one `git` subprocess with an isolated environment and
//! fixed configuration overrides, so user config cannot change output formats.

use super::RepoStatus;
use crate::core::error::{GitError, RepoError, RepoResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Environment variables passed through to git
const ENV_WHITELIST: &[&str] = &[
  "PATH",
  "HOME",
  "USERPROFILE",
  "XDG_CONFIG_HOME",
  "SSH_AUTH_SOCK",
  "GIT_SSH_COMMAND",
  "GIT_AUTHOR_NAME",
  "GIT_AUTHOR_EMAIL",
  "GIT_AUTHOR_DATE",
  "GIT_COMMITTER_NAME",
  "GIT_COMMITTER_EMAIL",
  "GIT_COMMITTER_DATE",
];

/// Git backend using system git
pub struct SystemGit {
  /// Directory git is run from
  pub(crate) repo_path: PathBuf,
}

impl SystemGit {
  /// Create a backend rooted at `path`. Does not touch the filesystem.
  pub fn new(path: &Path) -> Self {
    Self {
      repo_path: path.to_path_buf(),
    }
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables except the whitelist
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    cmd.env_clear();
    for key in ENV_WHITELIST {
      if let Ok(value) = std::env::var(key) {
        cmd.env(key, value);
      }
    }

    cmd.arg("-c").arg("protocol.version=2");
    cmd.arg("-c").arg("core.quotePath=false");
    cmd.arg("-c").arg("color.ui=never");

    cmd
  }

  /// Run `git <args>` and return its raw output, logging the invocation
  pub(crate) fn output(&self, args: &[&str]) -> RepoResult<Output> {
    debug!(args = ?args, "git");
    self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute git {}", args.join(" ")))
  }

  /// Run `git <args>`, failing with `GitError::CommandFailed` on a non-zero exit
  pub(crate) fn run(&self, args: &[&str]) -> RepoResult<String> {
    let output = self.output(args)?;
    if !output.status.success() {
      return Err(RepoError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
      }));
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
  }
}

/// Parse `git status --porcelain=v1 --branch` output
///
/// The first line is the branch header, e.g.
/// `## main...origin/main [ahead 1, behind 2]`. Every other line is one path
/// prefixed by a two-letter status code.
pub(crate) fn parse_status(output: &str) -> RepoStatus {
  let mut status = RepoStatus::default();

  for line in output.lines() {
    if let Some(header) = line.strip_prefix("## ") {
      if let Some(start) = header.rfind('[')
        && let Some(end) = header[start..].find(']')
      {
        for part in header[start + 1..start + end].split(',') {
          let part = part.trim();
          if let Some(n) = part.strip_prefix("ahead ") {
            status.ahead = n.parse().unwrap_or(0);
          } else if let Some(n) = part.strip_prefix("behind ") {
            status.behind = n.parse().unwrap_or(0);
          }
        }
      }
      continue;
    }

    if line.len() > 3 {
      // Renames are reported as "R  old -> new"; keep the destination
      let path = &line[3..];
      let path = path.rsplit_once(" -> ").map(|(_, to)| to).unwrap_or(path);
      status.changed_files.push(path.to_string());
    }
  }

  status
}
