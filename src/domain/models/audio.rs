use anyhow::Result;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum AudioName {
    Command,
    None,
}

impl AudioName {
    pub fn parse(text: &str) -> Option<AudioName> {
        return AudioName::iter().find(|e| return e.to_string() == text);
    }
}

pub trait AudioPlayer {
    /// Returns the name of the player.
    fn name(&self) -> AudioName;

    /// Starts playing the pronunciation of `word` without waiting for it to
    /// finish. An error means playback could not be started at all.
    fn play(&self, word: &str) -> Result<()>;
}

pub type AudioBox = Box<dyn AudioPlayer + Send + Sync>;
