#[cfg(test)]
#[path = "word_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::StudyMode;

/// Number of words studied together before the repeat or next decision.
pub const SET_SIZE: usize = 9;

/// Words are shown in sub-sets of this size within a set.
pub const SUBSET_SIZE: usize = 3;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_tense: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Word {
    /// The expected answer formatted for display in the given mode.
    pub fn answer(&self, mode: StudyMode) -> String {
        if let (StudyMode::PastTense, Some(past_tense)) = (mode, &self.past_tense) {
            return format!("{} → {past_tense}", self.word);
        }

        return self.word.to_string();
    }
}

/// A full set of words and the position of the word currently shown. Words
/// and index only ever change together, either by building a new set or by
/// moving the cursor of an existing one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordSet {
    words: Vec<Word>,
    index: usize,
}

impl WordSet {
    pub fn new(words: Vec<Word>) -> Result<WordSet> {
        if words.len() != SET_SIZE {
            bail!(format!(
                "Expected a set of {SET_SIZE} words from the quiz server, received {}",
                words.len()
            ));
        }

        return Ok(WordSet { words, index: 0 });
    }

    pub fn words(&self) -> &[Word] {
        return &self.words;
    }

    pub fn index(&self) -> usize {
        return self.index;
    }

    pub fn current(&self) -> &Word {
        return &self.words[self.index];
    }

    pub fn move_to(&mut self, index: usize) -> Result<()> {
        if index >= self.words.len() {
            bail!(format!(
                "Word index {index} is out of bounds for a set of {}",
                self.words.len()
            ));
        }

        self.index = index;
        return Ok(());
    }

    /// Steps back one word. Returns false when already on the first word.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }

        self.index -= 1;
        return true;
    }

    /// 1-based number of the sub-set the current word belongs to.
    pub fn subset(&self) -> usize {
        return self.index / SUBSET_SIZE + 1;
    }

    pub fn subset_count(&self) -> usize {
        return self.words.len().div_ceil(SUBSET_SIZE);
    }
}
