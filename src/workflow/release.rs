//! Release flow
//!
//! VerifyRepo -> VerifyClean -> branch guard -> SyncCheck -> DiscoverPackages ->
//! SelectPackageAndBump -> ComputeVersion -> FetchCommitsSinceLastTag ->
//! FilterRelevantCommits -> GenerateNotes -> TagAndPushTag ->
//! PublishHostedRelease -> UpdateManifestVersion -> UpdateChangelog ->
//! CommitAndPushVersionBump
//!
//! No mutating call is made before the user confirms (or picks a draft).
//! Once the tag is pushed, later failures are reported but nothing is rolled
//! back.

use super::{display_dir, sync_check, verify_repository};
use crate::core::config::{RepoLayout, VersionStrategy};
use crate::core::context::RepoContext;
use crate::core::error::{RepoError, RepoResult, ValidationError};
use crate::core::vcs::{DEFAULT_REMOTE, Vcs};
use crate::hosting::{ReleasePublisher, ReleaseRequest};
use crate::release::changelog::update_changelog;
use crate::release::filter::relevant_commits;
use crate::release::notes::{contributors_summary, generate, group_by_author};
use crate::release::version::{prerelease_id, tag_pattern, tag_strategy};
use crate::release::{ReleasePlan, ReleaseTarget, VersionBump};
use crate::ui::{Prompter, SelectOption, StepProgress};
use crate::workspace::{self, Package, manifest};
use tracing::{info, warn};

/// Mutating steps shown on the progress bar
const MUTATING_STEPS: usize = 5;

/// Run the release flow to completion or the first terminal condition
pub fn run(
  ctx: &RepoContext,
  vcs: &dyn Vcs,
  prompter: &mut dyn Prompter,
  publisher: &dyn ReleasePublisher,
) -> RepoResult<ReleasePlan> {
  let config = &ctx.config;

  info!("release: verify repository");
  verify_repository(vcs)?;

  info!("release: verify clean working tree");
  if !vcs.status()?.is_clean() {
    return Err(ValidationError::DirtyWorkingTree.into());
  }

  let branch = vcs.current_branch()?;
  let branch_config = config
    .branch(&branch)
    .ok_or_else(|| ValidationError::BranchNotReleasable { branch: branch.clone() })?;
  let preid = prerelease_id(Some(branch_config));

  info!("release: sync check");
  sync_check(vcs, prompter)?;

  info!("release: discover packages");
  let packages = workspace::discover(&ctx.root, &config.layout)?;

  let target = select_target(ctx, packages, prompter)?;
  let bump = select_bump(&target, &preid, prompter)?;

  let draft = prompter.confirm("Create a draft release?", false)?;
  if !draft && !prompter.confirm("Are you sure you want to continue?", true)? {
    return Err(RepoError::Cancelled);
  }

  info!("release: compute version");
  let strategy = tag_strategy(&config.layout, config.release.version_strategy);
  let mut plan = ReleasePlan::new(target, bump, &preid, strategy, draft)?;

  info!("release: fetch commits since last tag");
  let last_tag = vcs.latest_tag(&tag_pattern(strategy, plan.target.name()))?;
  let commits = vcs.log_since(last_tag.as_deref())?;
  if commits.is_empty() {
    return Err(ValidationError::NoCommits.into());
  }

  let commits = if plan.target.filters_commits(config.is_monorepo()) {
    let relevant = relevant_commits(&commits, plan.target.name());
    if relevant.is_empty() {
      return Err(
        ValidationError::NothingToRelease {
          package: plan.target.name().to_string(),
        }
        .into(),
      );
    }
    relevant
  } else {
    commits
  };

  plan.notes = generate(&plan.tag, &commits);
  plan.commits = commits;

  println!(
    "\n🚀 Releasing {} ({}: {} --> {}) from {}",
    plan.tag,
    plan.bump.label(),
    plan.current_version,
    plan.new_version,
    branch
  );
  println!("👥 Contributors: {}", contributors_summary(&group_by_author(&plan.commits)));

  apply(ctx, vcs, publisher, &plan, &branch)?;

  println!("\n✅ Release completed successfully!\n");
  println!("{}", plan.tag);
  Ok(plan)
}

/// Package to release, or every package for a fixed workspace
fn select_target(ctx: &RepoContext, mut packages: Vec<Package>, prompter: &mut dyn Prompter) -> RepoResult<ReleaseTarget> {
  match (&ctx.config.layout, ctx.config.release.version_strategy) {
    (RepoLayout::Monorepo { .. }, VersionStrategy::Fixed) => Ok(ReleaseTarget::Fixed {
      name: ctx.config.name.clone(),
      packages,
    }),
    (RepoLayout::Monorepo { .. }, VersionStrategy::Independent) => {
      let options: Vec<SelectOption> = packages
        .iter()
        .map(|p| SelectOption::with_hint(format!("{} ({})", p.name, p.version), display_dir(&ctx.root, p)))
        .collect();
      let index = prompter.select("Which package would you like to release?", &options)?;
      if index >= packages.len() {
        return Err(
          ValidationError::InvalidSelection {
            index,
            count: packages.len(),
          }
          .into(),
        );
      }
      Ok(ReleaseTarget::Package(packages.swap_remove(index)))
    }
    (RepoLayout::Single, _) => packages
      .into_iter()
      .next()
      .map(ReleaseTarget::Package)
      .ok_or_else(|| ValidationError::NoPackages.into()),
  }
}

/// Bump kind, with a `current --> next` preview for each option
fn select_bump(target: &ReleaseTarget, preid: &str, prompter: &mut dyn Prompter) -> RepoResult<VersionBump> {
  let current = target.current_version()?;
  let options: Vec<SelectOption> = VersionBump::ALL
    .iter()
    .map(|bump| SelectOption::with_hint(bump.label(), format!("{} --> {}", current, bump.apply(&current, preid))))
    .collect();
  let index = prompter.select("Select release type", &options)?;
  VersionBump::ALL.get(index).copied().ok_or_else(|| {
    ValidationError::InvalidSelection {
      index,
      count: VersionBump::ALL.len(),
    }
    .into()
  })
}

/// The mutating tail of the flow
fn apply(
  ctx: &RepoContext,
  vcs: &dyn Vcs,
  publisher: &dyn ReleasePublisher,
  plan: &ReleasePlan,
  branch: &str,
) -> RepoResult<()> {
  let mut progress = StepProgress::new(MUTATING_STEPS, format!("Releasing {}", plan.tag));

  vcs.add_annotated_tag(&plan.tag, &plan.notes)?;
  vcs.push_tags(DEFAULT_REMOTE)?;
  progress.step("tag");

  let request = ReleaseRequest {
    tag_name: plan.tag.clone(),
    name: plan.tag.clone(),
    body: plan.notes.clone(),
    draft: plan.draft,
    prerelease: plan.prerelease,
  };
  if let Err(e) = publisher.create_release(&request) {
    warn!(tag = %plan.tag, "hosted release failed after the tag was pushed");
    eprintln!(
      "\n⚠️  Tag {tag} is already pushed. To remove it: git push {remote} --delete {tag} && git tag -d {tag}",
      tag = plan.tag,
      remote = DEFAULT_REMOTE
    );
    return Err(e);
  }
  progress.step("publish");

  let new_version = plan.new_version.to_string();
  let mut paths = Vec::with_capacity(plan.target.packages().len() + 1);
  for package in plan.target.packages() {
    paths.push(manifest::write_version(package, &new_version)?);
  }
  progress.step("manifest");

  let changelog = plan.target.changelog_path(&ctx.root);
  update_changelog(&changelog, &plan.notes)?;
  paths.push(changelog);
  progress.step("changelog");

  vcs.stage_paths(&paths)?;
  vcs.commit(&format!("chore(release): bump {}", plan.tag))?;
  vcs.push(DEFAULT_REMOTE, branch)?;
  progress.step("commit");

  Ok(())
}
