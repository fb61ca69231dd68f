//! Error types for repo-cli with contextual messages and exit codes
//!
//! Every failure a workflow can hit is one of these variants. Commands never
//! exit on their own: they return a `RepoError` and `main` decides the exit
//! code based on which flow produced it.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for repo-cli
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Finished, or stopped with nothing to do
  Success = 0,
  /// User error (config, invalid input, cancelled release)
  User = 1,
  /// System error (git, network, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// The command that produced an error.
///
/// Cancellation and precondition failures exit 0 from `commit` but 1 from
/// `release` and `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
  Commit,
  Release,
  Check,
}

/// Main error type for repo-cli
#[derive(Debug)]
pub enum RepoError {
  /// Repository configuration errors (root package.json)
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Workflow preconditions that stop a flow without retry
  Validation(ValidationError),

  /// Hosted-repository API errors
  Hosting(HostingError),

  /// A package manifest that exists but cannot be read as JSON
  Manifest { path: PathBuf, message: String },

  /// I/O errors
  Io(io::Error),

  /// The user cancelled a prompt
  Cancelled,

  /// Generic error with message and optional context
  Message { message: String, context: Option<String> },
}

impl RepoError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    RepoError::Message {
      message: msg.into(),
      context: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      RepoError::Message { message, context } => RepoError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      // Stays an I/O error so the exit code is still a system failure
      RepoError::Io(e) => RepoError::Io(io::Error::new(e.kind(), format!("{}: {}", ctx_str, e))),
      _ => self,
    }
  }

  /// True for outcomes that end a flow without anything going wrong
  pub fn is_neutral(&self) -> bool {
    matches!(self, RepoError::Cancelled | RepoError::Validation(_))
  }

  /// Get the exit code for this error in the given flow
  pub fn exit_code(&self, flow: Flow) -> ExitCode {
    match self {
      RepoError::Cancelled | RepoError::Validation(_) => match flow {
        Flow::Commit => ExitCode::Success,
        Flow::Release | Flow::Check => ExitCode::User,
      },
      RepoError::Config(_) => ExitCode::User,
      RepoError::Manifest { .. } => ExitCode::User,
      RepoError::Message { .. } => ExitCode::User,
      RepoError::Git(_) => ExitCode::System,
      RepoError::Hosting(_) => ExitCode::System,
      RepoError::Io(_) => ExitCode::System,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      RepoError::Config(e) => e.help_message(),
      RepoError::Git(e) => e.help_message(),
      RepoError::Validation(e) => e.help_message(),
      RepoError::Hosting(e) => e.help_message(),
      _ => None,
    }
  }
}

impl fmt::Display for RepoError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RepoError::Config(e) => write!(f, "{}", e),
      RepoError::Git(e) => write!(f, "{}", e),
      RepoError::Validation(e) => write!(f, "{}", e),
      RepoError::Hosting(e) => write!(f, "{}", e),
      RepoError::Manifest { path, message } => {
        write!(f, "Failed to read manifest {}: {}", path.display(), message)
      }
      RepoError::Io(e) => write!(f, "I/O error: {}", e),
      RepoError::Cancelled => write!(f, "Operation cancelled by the user."),
      RepoError::Message { message, context } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for RepoError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RepoError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for RepoError {
  fn from(err: io::Error) -> Self {
    RepoError::Io(err)
  }
}

impl From<String> for RepoError {
  fn from(msg: String) -> Self {
    RepoError::message(msg)
  }
}

impl From<&str> for RepoError {
  fn from(msg: &str) -> Self {
    RepoError::message(msg)
  }
}

impl From<serde_json::Error> for RepoError {
  fn from(err: serde_json::Error) -> Self {
    RepoError::message(format!("JSON error: {}", err))
  }
}

impl From<ConfigError> for RepoError {
  fn from(err: ConfigError) -> Self {
    RepoError::Config(err)
  }
}

impl From<GitError> for RepoError {
  fn from(err: GitError) -> Self {
    RepoError::Git(err)
  }
}

impl From<ValidationError> for RepoError {
  fn from(err: ValidationError) -> Self {
    RepoError::Validation(err)
  }
}

impl From<HostingError> for RepoError {
  fn from(err: HostingError) -> Self {
    RepoError::Hosting(err)
  }
}

impl From<anyhow::Error> for RepoError {
  fn from(err: anyhow::Error) -> Self {
    RepoError::message(err.to_string())
  }
}

/// A single schema violation in the repository configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
  /// Dotted field path, e.g. `release.repositoryUrl`
  pub path: String,
  pub message: String,
}

impl ConfigIssue {
  pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      message: message.into(),
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Root package.json not found
  ManifestNotFound { path: PathBuf },

  /// Root package.json is not valid JSON
  Parse { path: PathBuf, message: String },

  /// One or more fields fail the schema
  Invalid { issues: Vec<ConfigIssue> },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::ManifestNotFound { .. } => Some("Run repo from the root of your project.".to_string()),
      ConfigError::Invalid { issues } if issues.iter().any(|i| i.path == "env.GITHUB_TOKEN") => Some(
        "Export GITHUB_TOKEN or add `GITHUB_TOKEN=...` to .env.local in the repository root.".to_string(),
      ),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::ManifestNotFound { path } => {
        write!(f, "No package.json found at: {}", path.display())
      }
      ConfigError::Parse { path, message } => {
        write!(f, "Failed to parse {}: {}", path.display(), message)
      }
      ConfigError::Invalid { issues } => {
        write!(f, "Invalid configuration: missing or invalid fields")?;
        for issue in issues {
          write!(f, "\n  {} {}", issue.path, issue.message)?;
        }
        Ok(())
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Pull failed (conflicts, diverged history)
  PullFailed { reason: String },

  /// Push failed
  PushFailed {
    remote: String,
    refspec: String,
    reason: String,
  },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::PushFailed { reason, refspec, remote } => {
        if reason.contains("non-fast-forward") || reason.contains("rejected") {
          Some("The remote has commits you don't have. Pull first, then push again.".to_string())
        } else if reason.contains("Permission denied") || reason.contains("403") {
          Some(format!(
            "Check your credentials for '{}'. Retry with: git push {} {}",
            remote, remote, refspec
          ))
        } else {
          None
        }
      }
      GitError::PullFailed { .. } => Some("Resolve the conflicts manually, then run repo again.".to_string()),
      GitError::CommandFailed { .. } => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr.trim_end())
      }
      GitError::PullFailed { reason } => {
        write!(f, "Error pulling changes: {}", reason.trim_end())
      }
      GitError::PushFailed { remote, refspec, reason } => {
        write!(f, "Push of {} to {} failed: {}", refspec, remote, reason.trim_end())
      }
    }
  }
}

/// Workflow preconditions. These end a flow immediately and are never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
  NotARepository,
  NothingToCommit,
  DirtyWorkingTree,
  NoPackages,
  NoCommits,
  NothingToRelease { package: String },
  InvalidVersion { input: String, reason: String },
  BranchNotReleasable { branch: String },
  /// A select prompt returned an index outside its options
  InvalidSelection { index: usize, count: usize },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::DirtyWorkingTree => Some("Commit your changes with `repo commit` before releasing.".to_string()),
      ValidationError::NoPackages => {
        Some("Check the `workspaces` patterns in package.json point at directories with a package.json.".to_string())
      }
      ValidationError::BranchNotReleasable { .. } => {
        Some("Add the branch to `release.branches` in package.json or switch branches.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::NotARepository => write!(f, "Not a git repository."),
      ValidationError::NothingToCommit => write!(f, "No changes detected. Operation cancelled."),
      ValidationError::DirtyWorkingTree => write!(f, "Changes detected. Commit changes before releasing."),
      ValidationError::NoPackages => write!(f, "No packages found in the repository."),
      ValidationError::NoCommits => write!(f, "No commits found since last release."),
      ValidationError::NothingToRelease { package } => {
        write!(f, "No commits mention '{}' since its last release. Nothing to release.", package)
      }
      ValidationError::InvalidVersion { input, reason } => {
        write!(f, "Invalid version '{}': {}", input, reason)
      }
      ValidationError::BranchNotReleasable { branch } => {
        write!(f, "Branch '{}' is not configured for releases.", branch)
      }
      ValidationError::InvalidSelection { index, count } => {
        write!(f, "Selection {} is out of range (1-{}).", index + 1, count)
      }
    }
  }
}

/// Hosted-repository API errors
#[derive(Debug)]
pub enum HostingError {
  /// Transport-level failure (DNS, TLS, timeout)
  Request { message: String },

  /// The API answered with an unexpected status
  Status { status: u16, body: String },

  /// `release.repositoryUrl` has no owner/repository path
  InvalidRepositoryUrl { url: String },
}

impl HostingError {
  fn help_message(&self) -> Option<String> {
    match self {
      HostingError::Status { status: 401, .. } | HostingError::Status { status: 403, .. } => {
        Some("Check that GITHUB_TOKEN is valid and can create releases.".to_string())
      }
      HostingError::InvalidRepositoryUrl { .. } => {
        Some("Use a URL like https://github.com/<owner>/<repo> for release.repositoryUrl.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for HostingError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      HostingError::Request { message } => write!(f, "Failed to create release on GitHub: {}", message),
      HostingError::Status { status, body } => {
        write!(f, "Failed to create release on GitHub (HTTP {}): {}", status, body.trim())
      }
      HostingError::InvalidRepositoryUrl { url } => {
        write!(f, "Cannot derive owner/repository from '{}'", url)
      }
    }
  }
}

/// Result type alias for repo-cli
pub type RepoResult<T> = Result<T, RepoError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> RepoResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<RepoError>,
{
  fn with_context<F>(self, f: F) -> RepoResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
///
/// Cancellations and preconditions are expected outcomes, so they are printed
/// without the error marker.
pub fn print_error(error: &RepoError) {
  if error.is_neutral() {
    eprintln!("\n■ {}\n", error);
  } else {
    eprintln!("\n❌ {}\n", error);
  }

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
