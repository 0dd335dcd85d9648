#[cfg(test)]
#[path = "quiz_test.rs"]
mod tests;

use std::time::Duration;

use super::ScheduledAdvance;
use crate::domain::models::AnswerRequest;
use crate::domain::models::AnswerStats;
use crate::domain::models::AudioBox;
use crate::domain::models::BackendBox;
use crate::domain::models::Feedback;
use crate::domain::models::Hint;
use crate::domain::models::PromptBox;
use crate::domain::models::QuizError;
use crate::domain::models::StudyMode;
use crate::domain::models::Transition;
use crate::domain::models::Word;
use crate::domain::models::WordSet;
use crate::domain::models::WordView;

pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(1000);

pub const SET_COMPLETE_MESSAGE: &str = "You finished all 9 words.\n\nYes: repeat the same 9 words\nNo: move on to 9 new words";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    Showing,
    AwaitingSetDecision,
}

pub struct QuizState {
    pub session_id: String,
    pub mode: StudyMode,
    pub set: Option<WordSet>,
    pub categories: Vec<String>,
    pub phase: QuizPhase,
}

impl Default for QuizState {
    fn default() -> QuizState {
        return QuizState {
            session_id: "".to_string(),
            mode: StudyMode::default(),
            set: None,
            categories: vec![],
            phase: QuizPhase::Idle,
        };
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub feedback: Feedback,
    pub stats: Option<AnswerStats>,
    /// Set when the pronunciation could not be played and has to be shown
    /// as text instead.
    pub notice: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Advanced {
    NextWord,
    NextSet,
    Repeated,
    NextNine,
    /// The set is complete but no decision was made. The controller keeps
    /// waiting for one.
    Undecided,
}

#[derive(Debug)]
pub struct Deleted {
    pub message: String,
    pub advance: Result<Advanced, QuizError>,
}

fn request_failed(call: &str, err: anyhow::Error) -> QuizError {
    tracing::error!(call, error = ?err, "Quiz server request failed");
    return QuizError::Request(err);
}

/// Walks the user through sets of nine words. The quiz server decides
/// whether answers are correct and what comes next; this only keeps the
/// local view of the session consistent.
pub struct QuizController {
    backend: BackendBox,
    prompt: PromptBox,
    audio: AudioBox,
    state: QuizState,
    feedback: Option<Feedback>,
    category: Option<String>,
    resume_session: Option<String>,
    advance_delay: Duration,
    scheduled: Option<ScheduledAdvance>,
}

impl QuizController {
    pub fn new(backend: BackendBox, prompt: PromptBox, audio: AudioBox) -> QuizController {
        return QuizController {
            backend,
            prompt,
            audio,
            state: QuizState::default(),
            feedback: None,
            category: None,
            resume_session: None,
            advance_delay: DEFAULT_ADVANCE_DELAY,
            scheduled: None,
        };
    }

    pub fn with_advance_delay(mut self, delay: Duration) -> QuizController {
        self.advance_delay = delay;
        return self;
    }

    pub fn with_resume_session(mut self, session_id: Option<String>) -> QuizController {
        self.resume_session = session_id.filter(|e| return !e.is_empty());
        return self;
    }

    pub fn state(&self) -> &QuizState {
        return &self.state;
    }

    pub fn phase(&self) -> QuizPhase {
        return self.state.phase;
    }

    pub fn mode(&self) -> StudyMode {
        return self.state.mode;
    }

    pub fn categories(&self) -> &[String] {
        return &self.state.categories;
    }

    pub fn selected_category(&self) -> Option<&str> {
        return self.category.as_deref();
    }

    pub fn scheduled_advance(&self) -> Option<&ScheduledAdvance> {
        return self.scheduled.as_ref();
    }

    /// The current word including the last answer's feedback.
    pub fn view(&self) -> Option<WordView> {
        let set = self.state.set.as_ref()?;
        return Some(WordView::new(set, self.state.mode, self.feedback.clone()));
    }

    pub async fn initialize(&mut self) -> Result<WordView, QuizError> {
        let payload = self
            .backend
            .init(self.resume_session.clone())
            .await
            .map_err(QuizError::Initialization)?;

        if payload.session_id.is_empty() {
            return Err(QuizError::Initialization(anyhow::anyhow!(
                "The quiz server did not return a session id"
            )));
        }
        let set = WordSet::new(payload.current_set).map_err(QuizError::Initialization)?;

        tracing::info!(
            session_id = %payload.session_id,
            categories = payload.categories.len(),
            "Quiz session started"
        );

        self.state = QuizState {
            session_id: payload.session_id,
            mode: StudyMode::BaseForm,
            set: Some(set),
            categories: payload.categories,
            phase: QuizPhase::Showing,
        };

        return self.display_current().ok_or(QuizError::NoActiveSet);
    }

    /// Projects the current word for display and resets the per-word UI:
    /// the answer field and the result message.
    pub fn display_current(&mut self) -> Option<WordView> {
        self.feedback = None;
        return self.view();
    }

    pub async fn submit_answer(&mut self, input: &str) -> Result<AnswerOutcome, QuizError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(QuizError::EmptyInput);
        }

        match self.state.phase {
            QuizPhase::Idle => return Err(QuizError::NoActiveSet),
            QuizPhase::AwaitingSetDecision => return Err(QuizError::Busy),
            QuizPhase::Showing => {}
        }
        if let Some(scheduled) = &self.scheduled {
            if !scheduled.is_cancelled() {
                return Err(QuizError::Busy);
            }
        }

        let word = self.current_word()?.clone();
        let mode = self.state.mode;
        let verdict = self
            .backend
            .check_answer(AnswerRequest {
                session_id: self.state.session_id.to_string(),
                user_input: input.to_string(),
                word_data: word.clone(),
                mode,
            })
            .await
            .map_err(|err| return request_failed("check-answer", err))?;

        tracing::debug!(
            word = %word.word,
            mode = %mode,
            correct = verdict.is_correct,
            "Answer graded"
        );

        let feedback = if verdict.is_correct {
            Feedback::correct(&word, mode)
        } else {
            Feedback::incorrect(&word, mode)
        };
        self.feedback = Some(feedback.clone());
        let notice = self.play_audio();

        if verdict.is_correct {
            self.scheduled = Some(ScheduledAdvance::after(self.advance_delay));
        }

        return Ok(AnswerOutcome {
            correct: verdict.is_correct,
            feedback,
            stats: verdict.stats(),
            notice,
        });
    }

    /// Performs the advance scheduled by a correct answer. Returns `None`
    /// when nothing is pending or it was cancelled in the meantime. A
    /// completed set is left `Undecided` without asking, the caller collects
    /// the decision and passes it to `decide_set`.
    pub async fn run_scheduled_advance(&mut self) -> Result<Option<Advanced>, QuizError> {
        match self.scheduled.take() {
            Some(scheduled) if !scheduled.is_cancelled() => {
                return Ok(Some(self.step(false).await?));
            }
            _ => return Ok(None),
        }
    }

    pub async fn advance(&mut self) -> Result<Advanced, QuizError> {
        return self.step(true).await;
    }

    async fn step(&mut self, ask: bool) -> Result<Advanced, QuizError> {
        self.cancel_scheduled();

        if self.state.phase == QuizPhase::AwaitingSetDecision {
            if !ask {
                return Ok(Advanced::Undecided);
            }
            return self.resolve_set_decision().await;
        }

        let index = self.active_set()?.index();
        let transition = self
            .backend
            .next_word(&self.state.session_id, index)
            .await
            .map_err(|err| return request_failed("next-word", err))?;

        match transition {
            Transition::NextWord { index } => {
                self.active_set_mut()?
                    .move_to(index)
                    .map_err(|err| return request_failed("next-word", err))?;
                self.display_current();
                return Ok(Advanced::NextWord);
            }
            Transition::NextSet { current_set } => {
                self.replace_set(current_set, "next-word")?;
                return Ok(Advanced::NextSet);
            }
            Transition::SetComplete => {
                tracing::info!(session_id = %self.state.session_id, "Set complete");
                self.state.phase = QuizPhase::AwaitingSetDecision;
                if !ask {
                    return Ok(Advanced::Undecided);
                }
                return self.resolve_set_decision().await;
            }
        }
    }

    /// Asks whether to repeat the finished set or move on to new words. If
    /// the question can't be answered the controller keeps waiting.
    pub async fn resolve_set_decision(&mut self) -> Result<Advanced, QuizError> {
        if self.state.phase != QuizPhase::AwaitingSetDecision {
            return Ok(Advanced::Undecided);
        }

        let repeat = match self.prompt.confirm_yes_no(SET_COMPLETE_MESSAGE) {
            Ok(repeat) => repeat,
            Err(err) => {
                tracing::warn!(error = ?err, "Set decision prompt failed");
                return Ok(Advanced::Undecided);
            }
        };

        return self.decide_set(repeat).await;
    }

    /// Applies an answer to the set decision: repeat the finished set or
    /// load new words from the selected category.
    pub async fn decide_set(&mut self, repeat: bool) -> Result<Advanced, QuizError> {
        if self.state.phase != QuizPhase::AwaitingSetDecision {
            return Ok(Advanced::Undecided);
        }

        if repeat {
            self.repeat_set().await?;
            return Ok(Advanced::Repeated);
        }

        let category = self.category.clone();
        self.load_next_set(category.as_deref()).await?;
        return Ok(Advanced::NextNine);
    }

    /// Steps back to the previous word without asking the server. Returns
    /// false when there is nothing to go back to.
    pub fn retreat(&mut self) -> bool {
        if self.state.phase != QuizPhase::Showing {
            return false;
        }

        let moved = match self.state.set.as_mut() {
            Some(set) => set.back(),
            None => false,
        };
        if moved {
            self.cancel_scheduled();
            self.display_current();
        }

        return moved;
    }

    pub async fn load_next_set(&mut self, category: Option<&str>) -> Result<WordView, QuizError> {
        self.require_session()?;
        self.cancel_scheduled();

        let words = self
            .backend
            .next_nine_words(&self.state.session_id, category.unwrap_or(""))
            .await
            .map_err(|err| return request_failed("next-nine-words", err))?;

        return self.replace_set(words, "next-nine-words");
    }

    pub async fn repeat_set(&mut self) -> Result<WordView, QuizError> {
        self.require_session()?;
        self.cancel_scheduled();

        let words = self
            .backend
            .repeat_nine_words(&self.state.session_id)
            .await
            .map_err(|err| return request_failed("repeat-nine-words", err))?;

        return self.replace_set(words, "repeat-nine-words");
    }

    /// Loads the word sheet of `mode`. Sheets differ per mode, so the mode
    /// only changes together with its words.
    pub async fn switch_mode(&mut self, mode: StudyMode) -> Result<WordView, QuizError> {
        self.require_session()?;
        self.cancel_scheduled();

        let words = self
            .backend
            .load_sheet(&self.state.session_id, mode)
            .await
            .map_err(|err| return request_failed("load-sheet", err))?;
        let set = WordSet::new(words).map_err(|err| return request_failed("load-sheet", err))?;

        self.state.set = Some(set);
        self.state.mode = mode;
        self.state.phase = QuizPhase::Showing;
        tracing::info!(mode = %mode, "Study mode switched");

        return self.display_current().ok_or(QuizError::NoActiveSet);
    }

    pub fn hint(&self) -> Result<Hint, QuizError> {
        return Ok(Hint::from_word(self.current_word()?));
    }

    /// Starts pronouncing the current word. Returns a text fallback when the
    /// audio player refuses.
    pub fn play_audio(&self) -> Option<String> {
        let word = &self.state.set.as_ref()?.current().word;
        if let Err(err) = self.audio.play(word) {
            tracing::debug!(player = %self.audio.name(), error = ?err, "Audio playback unavailable");
            return Some(format!("Pronunciation: {word}"));
        }

        return None;
    }

    /// Asks for a new word and its meaning and sends them to the server.
    /// Returns `None` when the user cancels either question.
    pub async fn add_word(&self) -> Result<Option<String>, QuizError> {
        let word = match self.ask_text("English word") {
            Some(word) => word,
            None => return Ok(None),
        };
        let meaning = match self.ask_text("Meaning") {
            Some(meaning) => meaning,
            None => return Ok(None),
        };

        let message = self
            .backend
            .add_word(&word, &meaning)
            .await
            .map_err(|err| return request_failed("add-word", err))?;

        return Ok(Some(
            message.unwrap_or_else(|| return "Word added.".to_string()),
        ));
    }

    /// Deletes the current word after confirmation, then moves on. Returns
    /// `None` when the user declines.
    pub async fn delete_current(&mut self) -> Result<Option<Deleted>, QuizError> {
        let word = self.current_word()?.word.to_string();
        let confirmed = match self.prompt.confirm_yes_no(&format!("Delete '{word}'?")) {
            Ok(confirmed) => confirmed,
            Err(err) => {
                tracing::warn!(error = ?err, "Delete prompt failed");
                false
            }
        };
        if !confirmed {
            return Ok(None);
        }

        let message = self
            .backend
            .delete_word(&word)
            .await
            .map_err(|err| return request_failed("delete-word", err))?
            .unwrap_or_else(|| return "Word deleted.".to_string());

        return Ok(Some(Deleted {
            message,
            advance: self.advance().await,
        }));
    }

    /// Picks the category used when moving on to new words. `None` or an
    /// empty name selects all categories.
    pub fn select_category(&mut self, category: Option<String>) -> Result<(), QuizError> {
        let category = category
            .map(|e| return e.trim().to_string())
            .filter(|e| return !e.is_empty());

        if let Some(name) = &category {
            if !self.state.categories.contains(name) {
                return Err(QuizError::UnknownCategory(name.to_string()));
            }
        }

        self.category = category;
        return Ok(());
    }

    fn ask_text(&self, message: &str) -> Option<String> {
        match self.prompt.prompt_text(message) {
            Ok(Some(text)) if !text.trim().is_empty() => return Some(text.trim().to_string()),
            Ok(_) => return None,
            Err(err) => {
                tracing::warn!(error = ?err, "Text prompt failed");
                return None;
            }
        }
    }

    fn replace_set(&mut self, words: Vec<Word>, call: &str) -> Result<WordView, QuizError> {
        let set = WordSet::new(words).map_err(|err| return request_failed(call, err))?;

        self.state.set = Some(set);
        self.state.phase = QuizPhase::Showing;

        return self.display_current().ok_or(QuizError::NoActiveSet);
    }

    fn cancel_scheduled(&mut self) {
        if let Some(scheduled) = self.scheduled.take() {
            scheduled.cancel();
        }
    }

    fn require_session(&self) -> Result<(), QuizError> {
        if self.state.phase == QuizPhase::Idle {
            return Err(QuizError::NoActiveSet);
        }

        return Ok(());
    }

    fn active_set(&self) -> Result<&WordSet, QuizError> {
        return self.state.set.as_ref().ok_or(QuizError::NoActiveSet);
    }

    fn active_set_mut(&mut self) -> Result<&mut WordSet, QuizError> {
        return self.state.set.as_mut().ok_or(QuizError::NoActiveSet);
    }

    fn current_word(&self) -> Result<&Word, QuizError> {
        return Ok(self.active_set()?.current());
    }
}
