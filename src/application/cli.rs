#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::application::ui::help_text;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AudioName;
use crate::domain::models::StudyMode;
use crate::domain::models::Word;
use crate::domain::models::WordBackend;
use crate::infrastructure::backends::http::HttpBackend;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

/// Directory holding `debug.log`.
pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("NINEWORDS_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("ninewords");
}

fn format_word(word: &Word) -> String {
    let mut res = format!("- {}", word.word);
    if let Some(past_tense) = &word.past_tense {
        res = format!("{res} ({past_tense})");
    }
    res = format!("{res}: {}", word.meaning);

    if let Some(category) = word.category.as_ref().filter(|e| return !e.is_empty()) {
        res = format!("{res} [{category}]");
    }

    return res;
}

async fn print_words_list() -> Result<()> {
    let words = HttpBackend::default()
        .list_words()
        .await?
        .iter()
        .map(|word| {
            return format_word(word);
        })
        .collect::<Vec<String>>();

    if words.is_empty() {
        println!("The quiz server has no words yet. Add one with `ninewords words add`.");
    } else {
        println!("{}", words.join("\n"));
    }

    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd.about("Debug helpers for ninewords")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running ninewords with environment variable RUST_LOG=ninewords")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );

    return cmd;
}

fn arg_word() -> Arg {
    return Arg::new("word")
        .short('w')
        .long("word")
        .num_args(1)
        .help("The English word.")
        .required(true);
}

fn subcommand_words() -> Command {
    return Command::new("words")
        .about("Manage the words stored on the quiz server.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List every word known to the quiz server."))
        .subcommand(
            Command::new("add")
                .about("Add a word to the quiz server.")
                .arg(arg_word())
                .arg(
                    Arg::new("meaning")
                        .short('m')
                        .long("meaning")
                        .num_args(1)
                        .help("What the word means. This is what the quiz asks for.")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a word from the quiz server.")
                .arg(arg_word()),
        );
}

fn arg_mode() -> Arg {
    return Arg::new(ConfigKey::Mode.to_string())
        .short('m')
        .long(ConfigKey::Mode.to_string())
        .env("NINEWORDS_MODE")
        .num_args(1)
        .help(format!(
            "Which form of each word to type when the quiz starts. [default: {}]",
            Config::default(ConfigKey::Mode)
        ))
        .value_parser(PossibleValuesParser::new(StudyMode::VARIANTS));
}

fn arg_category() -> Arg {
    return Arg::new(ConfigKey::Category.to_string())
        .long(ConfigKey::Category.to_string())
        .env("NINEWORDS_CATEGORY")
        .num_args(1)
        .help("Category to draw new sets of nine words from. All categories are used if not set.");
}

fn arg_advance_delay() -> Arg {
    return Arg::new(ConfigKey::AdvanceDelay.to_string())
        .long(ConfigKey::AdvanceDelay.to_string())
        .env("NINEWORDS_ADVANCE_DELAY")
        .num_args(1)
        .help(format!(
            "Time in milliseconds to show a correct answer before moving to the next word. [default: {}]",
            Config::default(ConfigKey::AdvanceDelay)
        ));
}

fn arg_audio() -> Arg {
    return Arg::new(ConfigKey::Audio.to_string())
        .short('a')
        .long(ConfigKey::Audio.to_string())
        .env("NINEWORDS_AUDIO")
        .num_args(1)
        .help(format!(
            "How to play pronunciations after each answer. [default: {}]",
            Config::default(ConfigKey::Audio)
        ))
        .value_parser(PossibleValuesParser::new(AudioName::VARIANTS));
}

fn arg_audio_command() -> Arg {
    return Arg::new(ConfigKey::AudioCommand.to_string())
        .long(ConfigKey::AudioCommand.to_string())
        .env("NINEWORDS_AUDIO_COMMAND")
        .num_args(1)
        .help(format!(
            "Player command used when audio is set to command. The clip path is appended. [default: {}]",
            Config::default(ConfigKey::AudioCommand)
        ));
}

fn arg_session_id() -> Arg {
    return Arg::new(ConfigKey::SessionID.to_string())
        .short('i')
        .long(ConfigKey::SessionID.to_string())
        .env("NINEWORDS_SESSION_ID")
        .num_args(1)
        .help("Resume an existing quiz server session instead of starting a new one.");
}

fn subcommand_quiz() -> Command {
    return Command::new("quiz")
        .about("Start a quiz session.")
        .arg(arg_mode())
        .arg(arg_category())
        .arg(arg_advance_delay())
        .arg(arg_audio())
        .arg(arg_audio_command())
        .arg(arg_session_id());
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("QUIZ {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("ninewords")
        .about(about)
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_quiz())
        .subcommand(subcommand_words())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(arg_mode())
        .arg(arg_category())
        .arg(arg_advance_delay())
        .arg(arg_audio())
        .arg(arg_audio_command())
        .arg(arg_session_id())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("NINEWORDS_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::ServerURL.to_string())
                .long(ConfigKey::ServerURL.to_string())
                .env("NINEWORDS_SERVER_URL")
                .num_args(1)
                .help(format!("Base URL of the quiz server. [default: {}]", Config::default(ConfigKey::ServerURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::RequestTimeout.to_string())
                .long(ConfigKey::RequestTimeout.to_string())
                .env("NINEWORDS_REQUEST_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds before giving up on a quiz server request. [default: {}]", Config::default(ConfigKey::RequestTimeout)))
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("quiz", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("words", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;

            match subcmd_matches.subcommand() {
                Some(("list", _)) => {
                    print_words_list().await?;
                }
                Some(("add", add_matches)) => {
                    let word = add_matches
                        .get_one::<String>("word")
                        .map(|e| return e.trim())
                        .unwrap_or_default();
                    let meaning = add_matches
                        .get_one::<String>("meaning")
                        .map(|e| return e.trim())
                        .unwrap_or_default();
                    if word.is_empty() || meaning.is_empty() {
                        bail!("Both a word and its meaning are required");
                    }

                    let message = HttpBackend::default().add_word(word, meaning).await?;
                    println!(
                        "{}",
                        message.unwrap_or_else(|| return format!("Added '{word}'"))
                    );
                }
                Some(("delete", delete_matches)) => {
                    let word = delete_matches
                        .get_one::<String>("word")
                        .map(|e| return e.trim())
                        .unwrap_or_default();
                    if word.is_empty() {
                        bail!("A word to delete is required");
                    }

                    let message = HttpBackend::default().delete_word(word).await?;
                    println!(
                        "{}",
                        message.unwrap_or_else(|| return format!("Deleted '{word}'"))
                    );
                }
                _ => {
                    subcommand_words().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
