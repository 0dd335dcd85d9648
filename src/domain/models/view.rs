#[cfg(test)]
#[path = "view_test.rs"]
mod tests;

use super::StudyMode;
use super::Word;
use super::WordSet;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    Correct,
    Incorrect,
}

/// Result message shown below the prompt after an answer was graded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

impl Feedback {
    pub fn correct(word: &Word, mode: StudyMode) -> Feedback {
        return Feedback {
            kind: FeedbackKind::Correct,
            text: format!("✅ Correct: {}", word.answer(mode)),
        };
    }

    pub fn incorrect(word: &Word, mode: StudyMode) -> Feedback {
        return Feedback {
            kind: FeedbackKind::Incorrect,
            text: format!("❌ Incorrect! Answer: {}", word.answer(mode)),
        };
    }
}

/// Everything needed to render the word currently being asked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordView {
    pub mode: StudyMode,
    pub meaning: String,
    pub word_number: usize,
    pub word_count: usize,
    pub subset_number: usize,
    pub subset_count: usize,
    pub answer: String,
    pub feedback: Option<Feedback>,
}

impl WordView {
    pub fn new(set: &WordSet, mode: StudyMode, feedback: Option<Feedback>) -> WordView {
        // Both modes ask by meaning. Past tense sheets only differ in the
        // expected answer.
        return WordView {
            mode,
            meaning: set.current().meaning.to_string(),
            word_number: set.index() + 1,
            word_count: set.words().len(),
            subset_number: set.subset(),
            subset_count: set.subset_count(),
            answer: "".to_string(),
            feedback,
        };
    }

    pub fn progress(&self) -> String {
        return format!(
            "Word: {}/{} · Set: {}/{}",
            self.word_number, self.word_count, self.subset_number, self.subset_count
        );
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hint {
    pub example: Option<String>,
    pub first_letter: String,
}

impl Hint {
    pub fn from_word(word: &Word) -> Hint {
        let example = word
            .example
            .as_ref()
            .filter(|e| return !e.trim().is_empty())
            .cloned();

        return Hint {
            example,
            first_letter: word.word.chars().take(1).collect(),
        };
    }

    pub fn format(&self) -> String {
        let example = self.example.as_deref().unwrap_or("none");
        return format!(
            "Example:\n{example}\n\nFirst letter:\n{}...",
            self.first_letter
        );
    }
}
