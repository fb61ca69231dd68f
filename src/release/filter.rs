//! Commit relevance for a workspace package

use crate::core::vcs::CommitInfo;

/// True when `message` names the package as a whole token.
///
/// Tokens are split on anything that cannot appear in an npm package name,
/// so `feat(ui): x` mentions `ui` but `feat(ui-kit): x` does not.
pub fn mentions_package(message: &str, package_name: &str) -> bool {
  message
    .split(|c: char| !(c.is_alphanumeric() || matches!(c, '@' | '/' | '-' | '_' | '.')))
    .map(|token| token.trim_end_matches('.'))
    .any(|token| token == package_name)
}

/// Keep the commits that mention the package, in their original order
pub fn relevant_commits(commits: &[CommitInfo], package_name: &str) -> Vec<CommitInfo> {
  commits
    .iter()
    .filter(|c| mentions_package(&c.message, package_name))
    .cloned()
    .collect()
}
