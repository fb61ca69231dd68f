//! Repository context - build once, pass everywhere
//!
//! ```text
//! main.rs:
//!   RepoContext::build() -> &RepoContext
//!   |
//!   v
//! commands/commit.rs, release.rs, check.rs:
//!   fn run(ctx: &RepoContext)
//! ```

use crate::core::config::{RepoConfig, TOKEN_VAR};
use crate::core::error::RepoResult;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared run-level data: the repository root and its validated configuration.
///
/// The root is always passed explicitly to discovery and file writes, so
/// nothing below the command layer reads the process working directory.
#[derive(Clone)]
pub struct RepoContext {
  /// Repository root directory (absolute path)
  pub root: PathBuf,

  /// Configuration from the root package.json
  pub config: Arc<RepoConfig>,
}

impl RepoContext {
  /// Build the context for `root`, reading the token from the process environment.
  pub fn build(root: &Path) -> RepoResult<Self> {
    let env_token = std::env::var(TOKEN_VAR).ok();
    let config = Arc::new(RepoConfig::load(root, env_token)?);
    Ok(Self {
      root: root.to_path_buf(),
      config,
    })
  }
}
