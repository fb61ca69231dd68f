//! CHANGELOG.md append-or-create

use crate::core::error::{RepoResult, ResultExt};
use std::fs;
use std::io;
use std::path::Path;

pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Append `notes` under the existing changelog, or create one with a heading
pub fn update_changelog(path: &Path, notes: &str) -> RepoResult<()> {
  let content = match fs::read_to_string(path) {
    Ok(existing) => format!("{}\n\n{}", existing, notes),
    Err(e) if e.kind() == io::ErrorKind::NotFound => format!("# Changelog\n\n{}", notes),
    Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
  };

  fs::write(path, content).with_context(|| format!("Failed to write changelog {}", path.display()))?;
  Ok(())
}
