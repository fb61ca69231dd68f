//! Interactive prompts
//!
//! Workflows ask questions through [`Prompter`]. Cancellation is an error
//! value (`RepoError::Cancelled`), never a sentinel answer, so `?` aborts the
//! whole flow from any prompt.

use crate::core::error::{RepoError, RepoResult};
use std::io::{self, BufRead, Write};

/// One entry of a single-select prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
  pub label: String,
  pub hint: Option<String>,
}

impl SelectOption {
  pub fn with_hint(label: impl Into<String>, hint: impl Into<String>) -> Self {
    Self {
      label: label.into(),
      hint: Some(hint.into()),
    }
  }
}

pub trait Prompter {
  /// Pick one option, returning its index
  fn select(&mut self, message: &str, options: &[SelectOption]) -> RepoResult<usize>;

  fn confirm(&mut self, message: &str, default: bool) -> RepoResult<bool>;

  /// Free text, trimmed. A required answer is never empty.
  fn text(&mut self, message: &str, required: bool) -> RepoResult<String>;
}

/// Line-based prompter over any reader/writer pair.
///
/// End of input or a lone `Esc` cancels.
pub struct TerminalPrompter<R, W> {
  input: R,
  output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
  pub fn stdio() -> Self {
    Self::new(io::stdin().lock(), io::stdout())
  }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
  pub fn new(input: R, output: W) -> Self {
    Self { input, output }
  }

  fn read_answer(&mut self) -> RepoResult<String> {
    self.output.flush()?;
    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      writeln!(self.output)?;
      return Err(RepoError::Cancelled);
    }
    let answer = line.trim();
    if answer == "\u{1b}" {
      return Err(RepoError::Cancelled);
    }
    Ok(answer.to_string())
  }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
  fn select(&mut self, message: &str, options: &[SelectOption]) -> RepoResult<usize> {
    writeln!(self.output, "\n◆ {}", message)?;
    for (i, option) in options.iter().enumerate() {
      match &option.hint {
        Some(hint) => writeln!(self.output, "  {}) {} ({})", i + 1, option.label, hint)?,
        None => writeln!(self.output, "  {}) {}", i + 1, option.label)?,
      }
    }

    loop {
      write!(self.output, "  Select [1-{}, default 1]: ", options.len())?;
      let answer = self.read_answer()?;
      if answer.is_empty() && !options.is_empty() {
        return Ok(0);
      }
      match answer.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
        _ => writeln!(self.output, "  Enter a number between 1 and {}.", options.len())?,
      }
    }
  }

  fn confirm(&mut self, message: &str, default: bool) -> RepoResult<bool> {
    let choices = if default { "[Y/n]" } else { "[y/N]" };
    loop {
      write!(self.output, "\n◆ {} {} ", message, choices)?;
      let answer = self.read_answer()?.to_lowercase();
      match answer.as_str() {
        "" => return Ok(default),
        "y" | "yes" => return Ok(true),
        "n" | "no" => return Ok(false),
        _ => writeln!(self.output, "  Answer y or n.")?,
      }
    }
  }

  fn text(&mut self, message: &str, required: bool) -> RepoResult<String> {
    loop {
      write!(self.output, "\n◆ {}: ", message)?;
      let answer = self.read_answer()?;
      if required && answer.is_empty() {
        writeln!(self.output, "  This field is required.")?;
        continue;
      }
      return Ok(answer);
    }
  }
}
