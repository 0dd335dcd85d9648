#[cfg(test)]
#[path = "command_test.rs"]
mod tests;

use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use tokio::process::Command;
use tokio::runtime::Handle;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AudioName;
use crate::domain::models::AudioPlayer;

/// Pronunciation of one word, fetched from the quiz server.
#[derive(Clone, Debug)]
struct AudioClip {
    url: String,
    timeout: Duration,
    word: String,
}

impl AudioClip {
    fn file_prefix(&self) -> String {
        let name = self
            .word
            .chars()
            .map(|e| {
                if e.is_ascii_alphanumeric() {
                    return e;
                }
                return '_';
            })
            .collect::<String>();

        return format!("ninewords-{name}-");
    }

    /// Every play gets its own file so overlapping plays of the same word
    /// never share one. It is removed when dropped.
    fn temp_file(&self, bytes: &[u8]) -> Result<tempfile::NamedTempFile> {
        let mut temp_file = tempfile::Builder::new()
            .prefix(&self.file_prefix())
            .suffix(".mp3")
            .tempfile()?;

        temp_file.write_all(bytes)?;
        temp_file.flush()?;
        return Ok(temp_file);
    }

    async fn download(&self) -> Result<Vec<u8>> {
        let res = reqwest::Client::new()
            .get(format!(
                "{url}/api/play-audio",
                url = self.url.trim_end_matches('/')
            ))
            .query(&[("word", self.word.as_str())])
            .timeout(self.timeout)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::warn!(
                word = %self.word,
                status = res.status().as_u16(),
                "Audio download failed"
            );
            bail!(format!(
                "Quiz server returned {} for play-audio",
                res.status().as_u16()
            ));
        }

        return Ok(res.bytes().await?.to_vec());
    }

    async fn play_with(&self, program: &str, args: &[String]) -> Result<()> {
        let bytes = self.download().await?;
        let temp_file = self.temp_file(&bytes)?;

        let status = Command::new(program)
            .args(args)
            .arg(temp_file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;
        temp_file.close()?;

        let status = status?;
        if !status.success() {
            bail!(format!("{program} exited with {status}"));
        }

        return Ok(());
    }
}

/// Plays pronunciations through an external player such as mpv.
pub struct CommandPlayer {
    url: String,
    command: String,
    timeout: String,
}

impl Default for CommandPlayer {
    fn default() -> CommandPlayer {
        return CommandPlayer {
            url: Config::get(ConfigKey::ServerURL),
            command: Config::get(ConfigKey::AudioCommand),
            timeout: Config::get(ConfigKey::RequestTimeout),
        };
    }
}

impl CommandPlayer {
    fn program(&self) -> Result<(String, Vec<String>)> {
        let mut parts = self
            .command
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();

        if parts.is_empty() {
            bail!("No audio command configured");
        }

        let program = parts.remove(0);
        return Ok((program, parts));
    }
}

impl AudioPlayer for CommandPlayer {
    fn name(&self) -> AudioName {
        return AudioName::Command;
    }

    fn play(&self, word: &str) -> Result<()> {
        let (program, args) = self.program()?;
        let handle = Handle::try_current()?;
        let clip = AudioClip {
            url: self.url.to_string(),
            timeout: Duration::from_millis(self.timeout.parse::<u64>()?),
            word: word.to_string(),
        };

        handle.spawn(async move {
            if let Err(err) = clip.play_with(&program, &args).await {
                tracing::warn!(word = %clip.word, error = ?err, "Audio playback failed");
            }
        });

        return Ok(());
    }
}
