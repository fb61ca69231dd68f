mod commands;
mod commit;
mod core;
mod hosting;
mod release;
mod ui;
mod workflow;
mod workspace;

use clap::{Parser, Subcommand};
use core::error::{Flow, RepoError, print_error};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Guided Conventional Commits and semver releases for package.json repositories
#[derive(Parser)]
#[command(name = "repo")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compose a Conventional Commits message, commit and optionally push
  Commit,

  /// Bump a version, tag it, publish a GitHub release and update the changelog
  Release,

  /// Show configuration, branch, working tree and package diagnostics
  Check,
}

impl Commands {
  fn flow(&self) -> Flow {
    match self {
      Commands::Commit => Flow::Commit,
      Commands::Release => Flow::Release,
      Commands::Check => Flow::Check,
    }
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(
      tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr),
    )
    .try_init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing();

  let flow = cli.command.flow();

  let repo_root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(RepoError::from(e).context("Failed to get current directory"), flow),
  };

  // Configuration is validated once, before any prompt or git call
  let ctx = match core::context::RepoContext::build(&repo_root) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e, flow),
  };

  let result = match cli.command {
    Commands::Commit => commands::run_commit(&ctx),
    Commands::Release => commands::run_release(&ctx),
    Commands::Check => commands::run_check(&ctx),
  };

  if let Err(err) = result {
    handle_error(err, flow);
  }
}

fn handle_error(err: RepoError, flow: Flow) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code(flow).as_i32());
}
