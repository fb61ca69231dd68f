//! Commit flow
//!
//! VerifyRepo -> SyncCheck -> VerifyDirty -> DiscoverPackages -> prompts ->
//! ComposeMessage -> StageAll -> Commit -> optional Push

use super::{display_dir, sync_check, verify_repository};
use crate::commit::{CommitAnswers, CommitType, compose_message};
use crate::core::config::{RepoLayout, VersionStrategy};
use crate::core::context::RepoContext;
use crate::core::error::{RepoError, RepoResult, ValidationError};
use crate::core::vcs::{DEFAULT_REMOTE, Vcs};
use crate::ui::{Prompter, SelectOption};
use crate::workspace::{self, Package};
use tracing::info;

/// What the commit flow did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
  pub message: String,
  pub branch: String,
  pub pushed: bool,
}

struct CommitChoices {
  answers: CommitAnswers,
  push: bool,
}

/// Run the commit flow to completion or the first terminal condition
pub fn run(ctx: &RepoContext, vcs: &dyn Vcs, prompter: &mut dyn Prompter) -> RepoResult<CommitOutcome> {
  info!("commit: verify repository");
  verify_repository(vcs)?;

  info!("commit: sync check");
  sync_check(vcs, prompter)?;

  info!("commit: verify pending changes");
  if vcs.status()?.is_clean() {
    return Err(ValidationError::NothingToCommit.into());
  }

  info!("commit: discover packages");
  let packages = workspace::discover(&ctx.root, &ctx.config.layout)?;
  let branch = vcs.current_branch()?;

  println!("\n📦 Repository: {}", ctx.config.name);
  println!("🌿 Branch:     {}", branch);

  let choices = collect_answers(ctx, &packages, prompter)?;
  let message = compose_message(&choices.answers);

  info!("commit: stage and commit");
  vcs.stage_all()?;
  vcs.commit(&message)?;

  if choices.push {
    info!(branch = %branch, "commit: push");
    vcs.push(DEFAULT_REMOTE, &branch)?;
  }

  println!("\n✅ Commit completed successfully!\n");
  println!("{}", message);
  if choices.push {
    println!("\n📤 Pushed to {}/{}", DEFAULT_REMOTE, branch);
  }

  Ok(CommitOutcome {
    message,
    branch,
    pushed: choices.push,
  })
}

/// The prompt group, in order. Nothing is mutated here.
fn collect_answers(ctx: &RepoContext, packages: &[Package], prompter: &mut dyn Prompter) -> RepoResult<CommitChoices> {
  if !prompter.confirm("Are you sure you want to continue?", true)? {
    return Err(RepoError::Cancelled);
  }

  let package = match ctx.config.layout {
    RepoLayout::Monorepo { .. } => {
      let options: Vec<SelectOption> = packages
        .iter()
        .map(|p| SelectOption::with_hint(format!("{} ({})", p.name, p.version), display_dir(&ctx.root, p)))
        .collect();
      let index = prompter.select("Which package would you like to commit?", &options)?;
      packages.get(index).ok_or(ValidationError::InvalidSelection {
        index,
        count: packages.len(),
      })?
    }
    RepoLayout::Single => packages.first().ok_or(ValidationError::NoPackages)?,
  };

  let type_options: Vec<SelectOption> = CommitType::ALL
    .iter()
    .map(|t| SelectOption::with_hint(t.label(), t.hint()))
    .collect();
  let type_index = prompter.select("What type of commit is this?", &type_options)?;
  let commit_type = CommitType::ALL
    .get(type_index)
    .copied()
    .ok_or(ValidationError::InvalidSelection {
      index: type_index,
      count: CommitType::ALL.len(),
    })?;

  let scope = match (&ctx.config.layout, ctx.config.release.version_strategy) {
    (RepoLayout::Single, _) => None,
    (RepoLayout::Monorepo { .. }, VersionStrategy::Independent) => Some(package.name.clone()),
    (RepoLayout::Monorepo { .. }, VersionStrategy::Fixed) => Some(prompter.text("Enter a commit scope", true)?),
  };

  let short_description = prompter.text("Enter a commit message", true)?;
  let long_description = Some(prompter.text("Enter a longer commit description (optional)", false)?)
    .filter(|s| !s.is_empty());

  let breaking = if prompter.confirm("Does this commit introduce breaking changes?", false)? {
    Some(prompter.text("Enter a description of the breaking changes", true)?)
  } else {
    None
  };

  let push = prompter.confirm("Would you like to push the commit to the remote?", true)?;

  Ok(CommitChoices {
    answers: CommitAnswers {
      commit_type,
      scope,
      short_description,
      long_description,
      breaking,
    },
    push,
  })
}
