//! # Prompts Module
//!
//! Interactive fallback for values that were not supplied on the command line
//! or in the config file, styled with a shared dialoguer theme.

use anyhow::{Context, Result};
use console::Style;
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;

/// Returns a custom dialoguer theme matching spillover's color palette.
pub fn spillover_theme() -> ColorfulTheme {
  ColorfulTheme {
    prompt_style: Style::new().cyan().bold(),
    active_item_prefix: Style::new().green().apply_to("❯ ".to_string()),
    active_item_style: Style::new().green(),
    ..ColorfulTheme::default()
  }
}

/// Source of answers for values the user did not supply up front
pub trait Prompter {
  /// Ask for a value. `None` means the user left the answer blank.
  fn ask(&self, prompt: &str) -> Result<Option<String>>;
}

/// Prompts on the terminal through dialoguer
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
  fn ask(&self, prompt: &str) -> Result<Option<String>> {
    let answer: String = Input::with_theme(&spillover_theme())
      .with_prompt(prompt)
      .allow_empty(true)
      .interact_text()
      .context("Failed to read input")?;

    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
  }
}

/// Never prompts; every question is answered with a blank
pub struct NoPrompter;

impl Prompter for NoPrompter {
  fn ask(&self, _prompt: &str) -> Result<Option<String>> {
    Ok(None)
  }
}
