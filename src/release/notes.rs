//! Release notes from a commit list
//!
//! `generate` is pure: the same label and commits always give the same text.
//! Relevance filtering happens before, in [`super::filter`].

use crate::core::vcs::CommitInfo;
use std::fmt::Write;

/// Commits attributed to one author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorGroup {
  pub author: String,
  pub hashes: Vec<String>,
}

/// Render the notes block: a heading with `label`, then one bullet per commit
/// in input order.
pub fn generate(label: &str, commits: &[CommitInfo]) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "\n### Changes ({})", label);
  for commit in commits {
    let _ = writeln!(out, "\n- {} ({})", commit.message, commit.hash);
  }
  out
}

/// Group commit hashes by author name, authors in first-seen order.
///
/// Every hash lands in exactly one group.
pub fn group_by_author(commits: &[CommitInfo]) -> Vec<AuthorGroup> {
  let mut groups: Vec<AuthorGroup> = Vec::new();
  for commit in commits {
    match groups.iter_mut().find(|g| g.author == commit.author_name) {
      Some(group) => group.hashes.push(commit.hash.clone()),
      None => groups.push(AuthorGroup {
        author: commit.author_name.clone(),
        hashes: vec![commit.hash.clone()],
      }),
    }
  }
  groups
}

/// One-line contributor summary, e.g. `Ada (2), Lin (1)`
pub fn contributors_summary(groups: &[AuthorGroup]) -> String {
  groups
    .iter()
    .map(|g| format!("{} ({})", g.author, g.hashes.len()))
    .collect::<Vec<_>>()
    .join(", ")
}
