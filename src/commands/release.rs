//! `repo release` - cut a semver release and publish it on GitHub

use crate::core::context::RepoContext;
use crate::core::error::RepoResult;
use crate::core::vcs::SystemGit;
use crate::hosting::GithubClient;
use crate::ui::TerminalPrompter;
use crate::workflow;

/// Run the release command against the real git, terminal and GitHub
pub fn run_release(ctx: &RepoContext) -> RepoResult<()> {
  let git = SystemGit::new(&ctx.root);
  let github = GithubClient::from_config(&ctx.config)?;
  let mut prompter = TerminalPrompter::stdio();

  workflow::release::run(ctx, &git, &mut prompter, &github)?;
  Ok(())
}
