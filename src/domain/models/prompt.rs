use anyhow::Result;

/// Blocking dialogs the quiz needs from the user: yes/no confirmations and
/// free text answers.
pub trait UserPrompt {
    fn confirm_yes_no(&self, message: &str) -> Result<bool>;

    /// Returns `None` when the user cancels or leaves the answer empty.
    fn prompt_text(&self, message: &str) -> Result<Option<String>>;
}

pub type PromptBox = Box<dyn UserPrompt + Send + Sync>;
