#[cfg(test)]
#[path = "mode_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// What the user is asked to type for each word. The serialized names are
/// the ones the quiz server expects, the display names are used for the CLI
/// and config file.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    EnumVariantNames,
    strum::Display,
)]
pub enum StudyMode {
    #[default]
    #[serde(rename = "Words")]
    #[strum(serialize = "words")]
    BaseForm,
    #[serde(rename = "ed")]
    #[strum(serialize = "past-tense")]
    PastTense,
}

impl StudyMode {
    pub fn parse(text: &str) -> Option<StudyMode> {
        return StudyMode::iter().find(|e| return e.to_string() == text);
    }

    pub fn title(&self) -> &'static str {
        match self {
            StudyMode::BaseForm => return "Words",
            StudyMode::PastTense => return "Past Tense",
        }
    }

    /// Shown once after switching to the mode.
    pub fn instructions(&self) -> &'static str {
        match self {
            StudyMode::BaseForm => {
                return "📘 Loaded the Words sheet. Type the base form.";
            }
            StudyMode::PastTense => {
                return "⏰ Loaded the Past Tense sheet. Type the base and past forms separated by a space, e.g. arrive arrived";
            }
        }
    }
}
