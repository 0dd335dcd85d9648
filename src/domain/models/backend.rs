#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::StudyMode;
use super::Transition;
use super::Word;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitPayload {
    pub session_id: String,
    pub current_set: Vec<Word>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub session_id: String,
    pub user_input: String,
    pub word_data: Word,
    pub mode: StudyMode,
}

/// Running score kept by the quiz server for the current nine words.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnswerStats {
    pub correct_count: u32,
    pub total_attempts: u32,
    pub accuracy: f64,
}

impl AnswerStats {
    pub fn format(&self) -> String {
        return format!(
            "Score: {}/{} ({:.1}%)",
            self.correct_count, self.total_attempts, self.accuracy
        );
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerVerdict {
    pub is_correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_attempts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl AnswerVerdict {
    pub fn stats(&self) -> Option<AnswerStats> {
        let correct_count = self.correct_count?;
        let total_attempts = self.total_attempts?;
        let accuracy = self.accuracy.unwrap_or_else(|| {
            if total_attempts == 0 {
                return 0.0;
            }
            return f64::from(correct_count) / f64::from(total_attempts) * 100.0;
        });

        return Some(AnswerStats {
            correct_count,
            total_attempts,
            accuracy,
        });
    }
}

/// The quiz server. Grading, word selection, set progression and word
/// storage all live behind this trait.
#[async_trait]
pub trait WordBackend {
    /// Starts a session and returns its first set of words. Passing a
    /// `session_id` asks the server to reuse an existing session.
    async fn init(&self, session_id: Option<String>) -> Result<InitPayload>;

    /// Grades a typed answer. Parsing the input (e.g. splitting base and past
    /// forms) is left to the server.
    async fn check_answer(&self, req: AnswerRequest) -> Result<AnswerVerdict>;

    /// Asks the server what follows the word at `current_index`.
    async fn next_word(&self, session_id: &str, current_index: usize) -> Result<Transition>;

    /// Loads the word sheet for `mode` and switches the session to it.
    async fn load_sheet(&self, session_id: &str, mode: StudyMode) -> Result<Vec<Word>>;

    /// Loads nine new words. An empty `category` means all categories.
    async fn next_nine_words(&self, session_id: &str, category: &str) -> Result<Vec<Word>>;

    /// Loads the same nine words again.
    async fn repeat_nine_words(&self, session_id: &str) -> Result<Vec<Word>>;

    /// Adds a word to the server's word list. Returns the server's message.
    async fn add_word(&self, word: &str, meaning: &str) -> Result<Option<String>>;

    /// Removes a word from the server's word list. Returns the server's
    /// message.
    async fn delete_word(&self, word: &str) -> Result<Option<String>>;

    /// Lists every word known to the server.
    async fn list_words(&self) -> Result<Vec<Word>>;
}

pub type BackendBox = Box<dyn WordBackend + Send + Sync>;
