pub mod command;
pub mod noop;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::AudioBox;
use crate::domain::models::AudioName;

pub struct AudioManager {}

impl AudioManager {
    pub fn get(name: AudioName) -> Result<AudioBox> {
        if name == AudioName::Command {
            return Ok(Box::<command::CommandPlayer>::default());
        }

        if name == AudioName::None {
            return Ok(Box::<noop::NoopPlayer>::default());
        }

        bail!(format!("No audio player implemented for {name}"))
    }
}
