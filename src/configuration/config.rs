#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

#[cfg(target_os = "macos")]
use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::AudioName;
use crate::domain::models::StudyMode;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    AdvanceDelay,
    Audio,
    AudioCommand,
    Category,
    ConfigFile,
    Mode,
    RequestTimeout,
    #[strum(serialize = "server-url")]
    ServerURL,
    #[strum(serialize = "session-id")]
    SessionID,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default_config_path() -> path::PathBuf {
        #[cfg(not(target_os = "macos"))]
        let config_dir = dirs::config_dir().unwrap_or_else(|| return path::PathBuf::from("."));
        #[cfg(target_os = "macos")]
        let config_dir = env::var("HOME")
            .map(|e| return path::PathBuf::from(e).join(".config"))
            .unwrap_or_else(|_| return path::PathBuf::from("."));

        return config_dir.join("ninewords").join("config.toml");
    }

    pub fn default(key: ConfigKey) -> String {
        let default_mode = StudyMode::BaseForm.to_string();
        let default_audio = AudioName::None.to_string();
        let config_path = Config::default_config_path().to_string_lossy().to_string();

        let res: &str = match key {
            ConfigKey::AdvanceDelay => "1000",
            ConfigKey::Audio => &default_audio,
            ConfigKey::AudioCommand => "mpv --no-video --really-quiet",
            ConfigKey::Category => "",
            ConfigKey::Mode => &default_mode,
            ConfigKey::RequestTimeout => "10000",
            ConfigKey::ServerURL => "http://localhost:5000",

            // Special
            ConfigKey::ConfigFile => &config_path,
            ConfigKey::SessionID => "",
        };

        return res.to_string();
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let mut possible_values = vec![];
                    if let Some(arg) = cmd
                        .get_arguments()
                        .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    {
                        possible_values = arg
                            .get_possible_values()
                            .iter()
                            .map(|e| return e.get_name().to_string())
                            .collect::<Vec<String>>();
                    }

                    if let Some(val_int) = val.as_integer() {
                        if val_int < 0 {
                            bail!(format!(
                                "config.toml has an invalid value for key '{key}': {val_int}"
                            ));
                        }
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        for key in [ConfigKey::AdvanceDelay, ConfigKey::RequestTimeout] {
            let val = Config::get(key);
            if val.parse::<u64>().is_err() {
                bail!(format!(
                    "'{key}' must be a number of milliseconds, got: {val}"
                ));
            }
        }

        tracing::debug!(
            server_url = %Config::get(ConfigKey::ServerURL),
            mode = %Config::get(ConfigKey::Mode),
            category = %Config::get(ConfigKey::Category),
            audio = %Config::get(ConfigKey::Audio),
            advance_delay = %Config::get(ConfigKey::AdvanceDelay),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::SessionID || key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|e| return e.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i32>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
