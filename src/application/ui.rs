#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use std::io::Write;
use std::time::Duration;

use anyhow::anyhow;
use anyhow::Result;
use tokio::io;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AudioName;
use crate::domain::models::QuizError;
use crate::domain::models::SlashCommand;
use crate::domain::models::StudyMode;
use crate::domain::models::WordView;
use crate::domain::services::Advanced;
use crate::domain::services::AnswerOutcome;
use crate::domain::services::QuizController;
use crate::domain::services::QuizPhase;
use crate::domain::services::SET_COMPLETE_MESSAGE;
use crate::infrastructure::audio::AudioManager;
use crate::infrastructure::backends::http::HttpBackend;
use crate::infrastructure::prompts::terminal::TerminalPrompt;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /next (/n) - Move on to the next word.
- /prev (/p) - Go back to the previous word.
- /hint (/i) - Show an example sentence and the first letter of the answer.
- /audio (/a) - Play the pronunciation of the current word again.
- /add - Add a new word to the quiz server.
- /delete (/d) - Delete the current word from the quiz server.
- /words (/w) - Switch to the Words sheet and type base forms.
- /past (/ed) - Switch to the Past Tense sheet and type base and past forms, e.g. arrive arrived
- /category (/c) [NAME] - Choose the category for new words. Use `all` for every category, or leave out NAME to list them.
- /nine (/9) - Load nine new words from the chosen category.
- /repeat (/r) - Start the current nine words over.
- /help (/h) - Provides this help menu.
- /quit /exit (/q) - Exit ninewords.

Anything else you type is checked as the answer to the current word.
        "#;

    return text.trim().to_string();
}

/// Something to show the user in response to a line of input.
#[derive(Clone, Debug, PartialEq)]
pub enum Output {
    View(WordView),
    Outcome(AnswerOutcome),
    Text(String),
    Notice(String),
}

#[derive(Debug, Default)]
pub struct Reply {
    pub outputs: Vec<Output>,
    pub quit: bool,
}

pub fn render_view(view: &WordView) -> String {
    let mut lines = vec![
        format!("[{}] {}", view.mode.title(), view.progress()),
        format!("Meaning: {}", view.meaning),
    ];
    if let Some(feedback) = &view.feedback {
        lines.push(feedback.text.to_string());
    }

    return lines.join("\n");
}

pub fn render_outcome(outcome: &AnswerOutcome) -> String {
    let mut lines = vec![outcome.feedback.text.to_string()];
    if let Some(stats) = &outcome.stats {
        lines.push(stats.format());
    }
    if let Some(notice) = &outcome.notice {
        lines.push(notice.to_string());
    }

    return lines.join("\n");
}

fn render_categories(categories: &[String], selected: Option<&str>) -> String {
    let names = ["all"]
        .into_iter()
        .chain(categories.iter().map(|e| return e.as_str()))
        .collect::<Vec<&str>>()
        .join(", ");

    return format!(
        "Categories: {names}\nSelected: {}",
        selected.unwrap_or("all")
    );
}

fn error_outputs(err: QuizError) -> Vec<Output> {
    if let QuizError::EmptyInput = err {
        return vec![];
    }

    return vec![Output::Notice(err.to_string())];
}

fn view_outputs(controller: &QuizController) -> Vec<Output> {
    return controller.view().map(Output::View).into_iter().collect();
}

fn advanced_outputs(
    controller: &QuizController,
    res: Result<Advanced, QuizError>,
) -> Vec<Output> {
    let mut outputs = vec![];
    match res {
        Ok(Advanced::Undecided) => {
            outputs.push(Output::Text(format!(
                "{SET_COMPLETE_MESSAGE}\n\nType y or n."
            )));
            return outputs;
        }
        Ok(Advanced::Repeated) => {
            outputs.push(Output::Text("Repeating the same nine words.".to_string()));
        }
        Ok(Advanced::NextNine) => {
            outputs.push(Output::Text("Loaded nine new words.".to_string()));
        }
        Ok(Advanced::NextWord) | Ok(Advanced::NextSet) => {}
        Err(err) => return error_outputs(err),
    }

    outputs.extend(view_outputs(controller));
    return outputs;
}

async fn switch_mode_outputs(controller: &mut QuizController, mode: StudyMode) -> Vec<Output> {
    match controller.switch_mode(mode).await {
        Ok(view) => {
            return vec![
                Output::Text(mode.instructions().to_string()),
                Output::View(view),
            ];
        }
        Err(err) => return error_outputs(err),
    }
}

async fn handle_command(controller: &mut QuizController, cmd: SlashCommand) -> Reply {
    let mut reply = Reply::default();

    if cmd.is_quit() {
        reply.quit = true;
    } else if cmd.is_help() {
        reply.outputs.push(Output::Text(help_text()));
    } else if cmd.is_next() {
        let res = controller.advance().await;
        reply.outputs = advanced_outputs(controller, res);
    } else if cmd.is_prev() {
        if controller.retreat() {
            reply.outputs = view_outputs(controller);
        } else {
            reply
                .outputs
                .push(Output::Text("Already on the first word.".to_string()));
        }
    } else if cmd.is_hint() {
        match controller.hint() {
            Ok(hint) => reply.outputs.push(Output::Text(hint.format())),
            Err(err) => reply.outputs = error_outputs(err),
        }
    } else if cmd.is_audio() {
        if let Some(notice) = controller.play_audio() {
            reply.outputs.push(Output::Text(notice));
        }
    } else if cmd.is_add() {
        match controller.add_word().await {
            Ok(Some(message)) => reply.outputs.push(Output::Text(message)),
            Ok(None) => reply.outputs.push(Output::Text("Cancelled.".to_string())),
            Err(err) => reply.outputs = error_outputs(err),
        }
    } else if cmd.is_delete() {
        match controller.delete_current().await {
            Ok(Some(deleted)) => {
                reply.outputs.push(Output::Text(deleted.message));
                reply
                    .outputs
                    .extend(advanced_outputs(controller, deleted.advance));
            }
            Ok(None) => reply.outputs.push(Output::Text("Cancelled.".to_string())),
            Err(err) => reply.outputs = error_outputs(err),
        }
    } else if cmd.is_words() {
        reply.outputs = switch_mode_outputs(controller, StudyMode::BaseForm).await;
    } else if cmd.is_past() {
        reply.outputs = switch_mode_outputs(controller, StudyMode::PastTense).await;
    } else if cmd.is_category() {
        match cmd.rest() {
            None => {
                reply.outputs.push(Output::Text(render_categories(
                    controller.categories(),
                    controller.selected_category(),
                )));
            }
            Some(name) => {
                let category = Some(name).filter(|e| return !e.eq_ignore_ascii_case("all"));
                match controller.select_category(category) {
                    Ok(()) => {
                        let selected = controller.selected_category().unwrap_or("all");
                        reply.outputs.push(Output::Text(format!(
                            "New words will come from: {selected}. Use /nine to load them."
                        )));
                    }
                    Err(err) => reply.outputs = error_outputs(err),
                }
            }
        }
    } else if cmd.is_nine() {
        let category = controller.selected_category().map(|e| return e.to_string());
        match controller.load_next_set(category.as_deref()).await {
            Ok(view) => reply.outputs.push(Output::View(view)),
            Err(err) => reply.outputs = error_outputs(err),
        }
    } else if cmd.is_repeat() {
        match controller.repeat_set().await {
            Ok(view) => reply.outputs.push(Output::View(view)),
            Err(err) => reply.outputs = error_outputs(err),
        }
    }

    return reply;
}

fn parse_decision(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => return Some(true),
        "n" | "no" => return Some(false),
        _ => return None,
    }
}

/// Handles one line typed by the user. Slash commands run the matching
/// action. While a finished set waits for its decision, `y` or `n` answer
/// it. Everything else is submitted as an answer.
pub async fn handle_line(controller: &mut QuizController, line: &str) -> Reply {
    if let Some(cmd) = SlashCommand::parse(line) {
        return handle_command(controller, cmd).await;
    }

    if controller.phase() == QuizPhase::AwaitingSetDecision {
        if let Some(repeat) = parse_decision(line) {
            let res = controller.decide_set(repeat).await;
            return Reply {
                outputs: advanced_outputs(controller, res),
                quit: false,
            };
        }
    }

    match controller.submit_answer(line).await {
        Ok(outcome) => {
            return Reply {
                outputs: vec![Output::Outcome(outcome)],
                quit: false,
            };
        }
        Err(err) => {
            return Reply {
                outputs: error_outputs(err),
                quit: false,
            };
        }
    }
}

fn print_outputs(outputs: &[Output]) {
    for output in outputs {
        match output {
            Output::View(view) => {
                println!("\n{}", Paint::new(render_view(view)).bold());
            }
            Output::Outcome(outcome) => {
                if outcome.correct {
                    println!("{}", Paint::green(render_outcome(outcome)));
                } else {
                    println!("{}", Paint::yellow(render_outcome(outcome)));
                }
            }
            Output::Text(text) => println!("{text}"),
            Output::Notice(text) => println!("{}", Paint::red(text)),
        }
    }
}

fn print_prompt() -> Result<()> {
    print!("{} ", Paint::cyan(">"));
    std::io::stdout().flush()?;
    return Ok(());
}

fn build_controller() -> Result<QuizController> {
    let audio_name = Config::get(ConfigKey::Audio);
    let audio = AudioManager::get(
        AudioName::parse(&audio_name)
            .ok_or_else(|| return anyhow!(format!("Unknown audio player: {audio_name}")))?,
    )?;
    let advance_delay =
        Duration::from_millis(Config::get(ConfigKey::AdvanceDelay).parse::<u64>()?);

    let controller = QuizController::new(
        Box::<HttpBackend>::default(),
        Box::<TerminalPrompt>::default(),
        audio,
    )
    .with_advance_delay(advance_delay)
    .with_resume_session(Some(Config::get(ConfigKey::SessionID)));

    return Ok(controller);
}

pub async fn start() -> Result<()> {
    let mut controller = build_controller()?;

    let view = controller.initialize().await?;
    println!(
        "{}",
        Paint::new("Welcome to ninewords! Type /help to list commands.").dimmed()
    );

    let mode = StudyMode::parse(&Config::get(ConfigKey::Mode)).unwrap_or_default();
    if mode == StudyMode::BaseForm {
        print_outputs(&[Output::View(view)]);
    } else {
        print_outputs(&switch_mode_outputs(&mut controller, mode).await);
    }

    let category = Config::get(ConfigKey::Category);
    if !category.is_empty() {
        if let Err(err) = controller.select_category(Some(category)) {
            print_outputs(&error_outputs(err));
        }
    }

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        print_prompt()?;

        let next_line = match controller.scheduled_advance().cloned() {
            Some(scheduled) => {
                tokio::select! {
                    fired = scheduled.wait() => {
                        if fired {
                            println!();
                        }
                        match controller.run_scheduled_advance().await {
                            Ok(Some(advanced)) => {
                                print_outputs(&advanced_outputs(&controller, Ok(advanced)));
                            }
                            Ok(None) => {}
                            Err(err) => print_outputs(&error_outputs(err)),
                        }
                        continue;
                    }
                    line = lines.next_line() => line?,
                }
            }
            None => lines.next_line().await?,
        };

        let line = match next_line {
            Some(line) => line,
            None => break,
        };

        let reply = handle_line(&mut controller, &line).await;
        print_outputs(&reply.outputs);
        if reply.quit {
            break;
        }
    }

    tracing::info!(session_id = %controller.state().session_id, "Quiz ended");
    return Ok(());
}
