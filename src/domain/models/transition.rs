#[cfg(test)]
#[path = "transition_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Word;

/// The quiz server's answer to "what comes after the current word". The
/// client never decides this on its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Transition {
    /// Stay in the current set and move to `index`.
    NextWord { index: usize },
    /// Replace the current set and start over at its first word.
    NextSet { current_set: Vec<Word> },
    /// All words of the set are done. The user decides between repeating the
    /// set and moving on to new words.
    SetComplete,
}
