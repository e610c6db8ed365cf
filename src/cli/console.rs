//! Interactive prompts

use crate::Result;
use dialoguer::{Confirm, Input, Password};

/// Console prompts used by the session driver
pub trait Console {
    /// Free-text line; may be empty
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Yes/no question
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Hidden input for secrets
    fn secret(&mut self, prompt: &str) -> Result<String>;
}

/// Terminal console backed by `dialoguer`
#[derive(Default)]
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn input(&mut self, prompt: &str) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let answer = Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(answer)
    }

    fn secret(&mut self, prompt: &str) -> Result<String> {
        let value = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;
        Ok(value)
    }
}
