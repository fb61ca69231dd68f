//! `repo commit` - guided Conventional Commits

use crate::core::context::RepoContext;
use crate::core::error::RepoResult;
use crate::core::vcs::SystemGit;
use crate::ui::TerminalPrompter;
use crate::workflow;

/// Run the commit command against the real git and terminal
pub fn run_commit(ctx: &RepoContext) -> RepoResult<()> {
  let git = SystemGit::new(&ctx.root);
  let mut prompter = TerminalPrompter::stdio();

  workflow::commit::run(ctx, &git, &mut prompter)?;
  Ok(())
}
