use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use test_utils::next_nine_words_fixture;
use test_utils::nine_words_fixture;
use test_utils::past_tense_fixture;

use crate::domain::models::AnswerRequest;
use crate::domain::models::AnswerVerdict;
use crate::domain::models::AudioName;
use crate::domain::models::AudioPlayer;
use crate::domain::models::InitPayload;
use crate::domain::models::StudyMode;
use crate::domain::models::Transition;
use crate::domain::models::UserPrompt;
use crate::domain::models::Word;
use crate::domain::models::WordBackend;

pub fn words(fixture: &str) -> Vec<Word> {
    return serde_json::from_str(fixture).unwrap();
}

#[derive(Default)]
pub struct FakeServer {
    pub calls: Vec<String>,
    pub answers: Vec<AnswerRequest>,
    pub categories_requested: Vec<String>,
    pub transitions: VecDeque<Transition>,
    pub session_requested: Option<String>,
    pub offline: bool,
    pub short_sets: bool,
    pub blank_session: bool,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    pub server: Arc<Mutex<FakeServer>>,
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<String> {
        return self.server.lock().unwrap().calls.clone();
    }

    pub fn go_offline(&self) {
        self.server.lock().unwrap().offline = true;
    }

    pub fn push_transition(&self, transition: Transition) {
        self.server.lock().unwrap().transitions.push_back(transition);
    }

    fn record(&self, call: &str) -> Result<()> {
        let mut server = self.server.lock().unwrap();
        server.calls.push(call.to_string());
        if server.offline {
            bail!("Connection refused");
        }

        return Ok(());
    }

    fn set(&self, fixture: &str) -> Vec<Word> {
        let mut res = words(fixture);
        if self.server.lock().unwrap().short_sets {
            res.truncate(4);
        }

        return res;
    }
}

#[async_trait]
impl WordBackend for FakeBackend {
    #[allow(clippy::implicit_return)]
    async fn init(&self, session_id: Option<String>) -> Result<InitPayload> {
        self.record("init")?;
        let blank_session = {
            let mut server = self.server.lock().unwrap();
            server.session_requested = session_id.clone();
            server.blank_session
        };

        let mut session_id = session_id.unwrap_or_else(|| return "abc".to_string());
        if blank_session {
            session_id = "".to_string();
        }

        return Ok(InitPayload {
            session_id,
            current_set: self.set(nine_words_fixture()),
            categories: vec!["noun".to_string(), "verb".to_string()],
        });
    }

    #[allow(clippy::implicit_return)]
    async fn check_answer(&self, req: AnswerRequest) -> Result<AnswerVerdict> {
        self.record("check-answer")?;

        let input = req.user_input.to_lowercase();
        let is_correct = match req.mode {
            StudyMode::BaseForm => input == req.word_data.word.to_lowercase(),
            StudyMode::PastTense => {
                let parts = input.split_whitespace().collect::<Vec<&str>>();
                parts.len() == 2
                    && parts[0] == req.word_data.word.to_lowercase()
                    && Some(parts[1].to_string())
                        == req.word_data.past_tense.as_ref().map(|e| return e.to_lowercase())
            }
        };

        let mut server = self.server.lock().unwrap();
        server.answers.push(req);
        let total = server.answers.len() as u32;

        return Ok(AnswerVerdict {
            is_correct,
            correct_count: Some(if is_correct { 1 } else { 0 }),
            total_attempts: Some(total),
            accuracy: None,
        });
    }

    #[allow(clippy::implicit_return)]
    async fn next_word(&self, _session_id: &str, current_index: usize) -> Result<Transition> {
        self.record("next-word")?;

        if let Some(transition) = self.server.lock().unwrap().transitions.pop_front() {
            return Ok(transition);
        }
        if current_index < 8 {
            return Ok(Transition::NextWord {
                index: current_index + 1,
            });
        }

        return Ok(Transition::SetComplete);
    }

    #[allow(clippy::implicit_return)]
    async fn load_sheet(&self, _session_id: &str, mode: StudyMode) -> Result<Vec<Word>> {
        self.record(&format!("load-sheet:{mode}"))?;

        match mode {
            StudyMode::BaseForm => return Ok(self.set(nine_words_fixture())),
            StudyMode::PastTense => return Ok(self.set(past_tense_fixture())),
        }
    }

    #[allow(clippy::implicit_return)]
    async fn next_nine_words(&self, _session_id: &str, category: &str) -> Result<Vec<Word>> {
        self.record("next-nine-words")?;
        self.server
            .lock()
            .unwrap()
            .categories_requested
            .push(category.to_string());

        return Ok(self.set(next_nine_words_fixture()));
    }

    #[allow(clippy::implicit_return)]
    async fn repeat_nine_words(&self, _session_id: &str) -> Result<Vec<Word>> {
        self.record("repeat-nine-words")?;
        return Ok(self.set(nine_words_fixture()));
    }

    #[allow(clippy::implicit_return)]
    async fn add_word(&self, word: &str, meaning: &str) -> Result<Option<String>> {
        self.record(&format!("add-word:{word}:{meaning}"))?;
        return Ok(Some(format!("Added '{word}'")));
    }

    #[allow(clippy::implicit_return)]
    async fn delete_word(&self, word: &str) -> Result<Option<String>> {
        self.record(&format!("delete-word:{word}"))?;
        return Ok(None);
    }

    #[allow(clippy::implicit_return)]
    async fn list_words(&self) -> Result<Vec<Word>> {
        self.record("get-words")?;
        return Ok(words(nine_words_fixture()));
    }
}

#[derive(Default)]
pub struct ScriptedPrompt {
    confirms: Mutex<VecDeque<bool>>,
    texts: Mutex<VecDeque<Option<String>>>,
    pub asked: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompt {
    pub fn confirming(answers: &[bool]) -> ScriptedPrompt {
        return ScriptedPrompt {
            confirms: Mutex::new(answers.iter().copied().collect()),
            ..ScriptedPrompt::default()
        };
    }

    pub fn typing(answers: &[Option<&str>]) -> ScriptedPrompt {
        return ScriptedPrompt {
            texts: Mutex::new(
                answers
                    .iter()
                    .map(|e| return e.map(|text| return text.to_string()))
                    .collect(),
            ),
            ..ScriptedPrompt::default()
        };
    }
}

impl UserPrompt for ScriptedPrompt {
    fn confirm_yes_no(&self, message: &str) -> Result<bool> {
        self.asked.lock().unwrap().push(message.to_string());
        match self.confirms.lock().unwrap().pop_front() {
            Some(answer) => return Ok(answer),
            None => bail!("No terminal attached"),
        }
    }

    fn prompt_text(&self, message: &str) -> Result<Option<String>> {
        self.asked.lock().unwrap().push(message.to_string());
        match self.texts.lock().unwrap().pop_front() {
            Some(answer) => return Ok(answer),
            None => bail!("No terminal attached"),
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingAudio {
    pub played: Arc<Mutex<Vec<String>>>,
    pub refuse: bool,
}

impl RecordingAudio {
    pub fn played(&self) -> Vec<String> {
        return self.played.lock().unwrap().clone();
    }
}

impl AudioPlayer for RecordingAudio {
    fn name(&self) -> AudioName {
        if self.refuse {
            return AudioName::None;
        }
        return AudioName::Command;
    }

    fn play(&self, word: &str) -> Result<()> {
        if self.refuse {
            bail!("Audio playback is disabled");
        }

        self.played.lock().unwrap().push(word.to_string());
        return Ok(());
    }
}
