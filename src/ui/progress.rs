//! Step progress for the mutating part of a release
//!
//! Uses `linya`, which draws to stderr and leaves stdout to the prompts.

use linya::{Bar, Progress};
use tracing::info;

/// A single bar advanced once per completed step
pub struct StepProgress {
  progress: Progress,
  bar: Bar,
}

impl StepProgress {
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self { progress, bar }
  }

  /// Record a finished step and redraw
  pub fn step(&mut self, name: &str) {
    info!(step = name, "release step done");
    self.progress.inc_and_draw(&self.bar, 1);
  }
}
