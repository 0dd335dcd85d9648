#[cfg(test)]
#[path = "noop_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::Result;

use crate::domain::models::AudioName;
use crate::domain::models::AudioPlayer;

#[derive(Default)]
pub struct NoopPlayer {}

impl AudioPlayer for NoopPlayer {
    fn name(&self) -> AudioName {
        return AudioName::None;
    }

    fn play(&self, _word: &str) -> Result<()> {
        return Err(anyhow!(
            "Audio playback is disabled. Set audio to 'command' to hear pronunciations"
        ));
    }
}
