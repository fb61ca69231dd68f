//! Conventional commit types and message composition

use std::fmt;

/// Conventional commit type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
  Feat,
  Fix,
  Chore,
  Docs,
  Style,
  Refactor,
  Perf,
  Test,
  Build,
  Ci,
  Revert,
}

impl CommitType {
  /// Prompt order
  pub const ALL: [CommitType; 11] = [
    CommitType::Feat,
    CommitType::Fix,
    CommitType::Chore,
    CommitType::Docs,
    CommitType::Style,
    CommitType::Refactor,
    CommitType::Perf,
    CommitType::Test,
    CommitType::Build,
    CommitType::Ci,
    CommitType::Revert,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      CommitType::Feat => "feat",
      CommitType::Fix => "fix",
      CommitType::Chore => "chore",
      CommitType::Docs => "docs",
      CommitType::Style => "style",
      CommitType::Refactor => "refactor",
      CommitType::Perf => "perf",
      CommitType::Test => "test",
      CommitType::Build => "build",
      CommitType::Ci => "ci",
      CommitType::Revert => "revert",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      CommitType::Feat => "Feature",
      CommitType::Fix => "Fix",
      CommitType::Chore => "Chore",
      CommitType::Docs => "Documentation",
      CommitType::Style => "Style",
      CommitType::Refactor => "Refactor",
      CommitType::Perf => "Performance",
      CommitType::Test => "Test",
      CommitType::Build => "Build",
      CommitType::Ci => "CI",
      CommitType::Revert => "Revert",
    }
  }

  pub fn hint(&self) -> &'static str {
    match self {
      CommitType::Feat => "A new feature",
      CommitType::Fix => "A bug fix",
      CommitType::Chore => "Maintenance that does not touch src or tests",
      CommitType::Docs => "Documentation only changes",
      CommitType::Style => "Formatting, whitespace, missing semicolons",
      CommitType::Refactor => "A change that neither fixes a bug nor adds a feature",
      CommitType::Perf => "A change that improves performance",
      CommitType::Test => "Adding or correcting tests",
      CommitType::Build => "Build system or external dependencies",
      CommitType::Ci => "CI configuration files and scripts",
      CommitType::Revert => "Reverts a previous commit",
    }
  }
}

impl fmt::Display for CommitType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Everything the commit prompts collect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitAnswers {
  pub commit_type: CommitType,
  pub scope: Option<String>,
  pub short_description: String,
  pub long_description: Option<String>,
  /// Description of the breaking change, when there is one
  pub breaking: Option<String>,
}

/// `{type}({scope}): {short}`, then the long description and a
/// `BREAKING CHANGES:` block, each after a blank line when present.
pub fn compose_message(answers: &CommitAnswers) -> String {
  let mut message = answers.commit_type.as_str().to_string();

  if let Some(scope) = answers.scope.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
    message.push('(');
    message.push_str(scope);
    message.push(')');
  }

  message.push_str(": ");
  message.push_str(answers.short_description.trim());

  if let Some(long) = answers.long_description.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
    message.push_str("\n\n");
    message.push_str(long);
  }

  if let Some(breaking) = answers.breaking.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
    message.push_str("\n\nBREAKING CHANGES: ");
    message.push_str(breaking);
  }

  message
}
