//! Terminal interaction: prompts and progress

pub mod progress;
pub mod prompt;

pub use progress::StepProgress;
pub use prompt::{Prompter, SelectOption, TerminalPrompter};
