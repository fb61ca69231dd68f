//! `Vcs` implementation for SystemGit (status, history, commits, tags, remotes)

use super::system_git::{SystemGit, parse_status};
use super::{CommitInfo, RepoStatus, Vcs};
use crate::core::error::{GitError, RepoError, RepoResult};
use std::path::PathBuf;
use tracing::debug;

/// Field and record separators for `git log --format`
const FIELD_SEP: char = '\x1f';
const RECORD_SEP: char = '\x1e';

impl Vcs for SystemGit {
  fn is_repository(&self) -> bool {
    match self.output(&["rev-parse", "--is-inside-work-tree"]) {
      Ok(output) => output.status.success() && String::from_utf8_lossy(&output.stdout).trim() == "true",
      Err(_) => false,
    }
  }

  fn status(&self) -> RepoResult<RepoStatus> {
    let stdout = self.run(&["status", "--porcelain=v1", "--branch"])?;
    Ok(parse_status(&stdout))
  }

  fn current_branch(&self) -> RepoResult<String> {
    // symbolic-ref works before the first commit, unlike rev-parse
    let output = self.output(&["symbolic-ref", "--short", "HEAD"])?;
    if !output.status.success() {
      return Ok("HEAD".to_string()); // Detached HEAD
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  fn has_remote(&self, name: &str) -> RepoResult<bool> {
    let stdout = self.run(&["remote"])?;
    Ok(stdout.lines().any(|line| line.trim() == name))
  }

  fn fetch(&self, remote: &str) -> RepoResult<()> {
    self.run(&["fetch", remote])?;
    Ok(())
  }

  fn pull(&self) -> RepoResult<()> {
    let output = self.output(&["pull", "--no-rebase", "--no-edit"])?;
    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      let stdout = String::from_utf8_lossy(&output.stdout);
      // Merge conflicts are reported on stdout
      let reason = if stderr.trim().is_empty() { stdout } else { stderr };
      return Err(RepoError::Git(GitError::PullFailed {
        reason: reason.to_string(),
      }));
    }
    Ok(())
  }

  fn stage_all(&self) -> RepoResult<()> {
    self.run(&["add", "-A"])?;
    Ok(())
  }

  fn stage_paths(&self, paths: &[PathBuf]) -> RepoResult<()> {
    if paths.is_empty() {
      return Ok(());
    }
    let mut args = vec!["add".to_string(), "--".to_string()];
    args.extend(paths.iter().map(|p| p.to_string_lossy().to_string()));
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    self.run(&args)?;
    Ok(())
  }

  fn commit(&self, message: &str) -> RepoResult<()> {
    self.run(&["commit", "-m", message])?;
    Ok(())
  }

  fn push(&self, remote: &str, branch: &str) -> RepoResult<()> {
    let output = self.output(&["push", remote, branch])?;
    if !output.status.success() {
      return Err(RepoError::Git(GitError::PushFailed {
        remote: remote.to_string(),
        refspec: branch.to_string(),
        reason: String::from_utf8_lossy(&output.stderr).to_string(),
      }));
    }
    Ok(())
  }

  fn latest_tag(&self, pattern: &str) -> RepoResult<Option<String>> {
    let output = self.output(&["describe", "--tags", "--abbrev=0", "--match", pattern])?;
    if !output.status.success() {
      // No matching tag, or no commits yet
      debug!(pattern, stderr = %String::from_utf8_lossy(&output.stderr).trim(), "no tag found");
      return Ok(None);
    }
    let tag = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((!tag.is_empty()).then_some(tag))
  }

  fn log_since(&self, since: Option<&str>) -> RepoResult<Vec<CommitInfo>> {
    let range = since.map(|tag| format!("{}..HEAD", tag));

    let mut args = vec!["log", "--format=%H%x1f%an%x1f%s%x1e"];
    if let Some(range) = &range {
      args.push(range.as_str());
    }

    let output = self.output(&args)?;
    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("does not have any commits") {
        return Ok(vec![]);
      }
      return Err(RepoError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        stderr: stderr.to_string(),
      }));
    }

    Ok(parse_log(&String::from_utf8_lossy(&output.stdout)))
  }

  fn add_annotated_tag(&self, name: &str, message: &str) -> RepoResult<()> {
    self.run(&["tag", "-a", name, "-m", message])?;
    Ok(())
  }

  fn push_tags(&self, remote: &str) -> RepoResult<()> {
    let output = self.output(&["push", remote, "--tags"])?;
    if !output.status.success() {
      return Err(RepoError::Git(GitError::PushFailed {
        remote: remote.to_string(),
        refspec: "--tags".to_string(),
        reason: String::from_utf8_lossy(&output.stderr).to_string(),
      }));
    }
    Ok(())
  }
}

/// Parse `git log --format=%H%x1f%an%x1f%s%x1e` output (newest first)
fn parse_log(output: &str) -> Vec<CommitInfo> {
  output
    .split(RECORD_SEP)
    .filter_map(|record| {
      let record = record.trim_start_matches('\n');
      if record.trim().is_empty() {
        return None;
      }
      let mut fields = record.splitn(3, FIELD_SEP);
      let hash = fields.next()?.trim();
      let author = fields.next()?;
      let message = fields.next().unwrap_or("").trim_end();
      Some(CommitInfo::new(hash, message, author))
    })
    .collect()
}
