use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use dialoguer::Input;

use crate::domain::models::UserPrompt;

/// Asks questions on the controlling terminal. Escaping a yes/no question
/// counts as no.
#[derive(Default)]
pub struct TerminalPrompt {}

impl UserPrompt for TerminalPrompt {
    fn confirm_yes_no(&self, message: &str) -> Result<bool> {
        let res = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(true)
            .interact_opt()?;

        return Ok(res.unwrap_or(false));
    }

    fn prompt_text(&self, message: &str) -> Result<Option<String>> {
        let res = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()?;

        if res.trim().is_empty() {
            return Ok(None);
        }

        return Ok(Some(res.trim().to_string()));
    }
}
