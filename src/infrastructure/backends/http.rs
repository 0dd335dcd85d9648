#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AnswerRequest;
use crate::domain::models::AnswerVerdict;
use crate::domain::models::InitPayload;
use crate::domain::models::StudyMode;
use crate::domain::models::Transition;
use crate::domain::models::Word;
use crate::domain::models::WordBackend;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionRequest {
    session_id: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct NextWordRequest {
    session_id: String,
    current_index: usize,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct NextNineRequest {
    session_id: String,
    // Left out for all categories so the server applies its own default.
    #[serde(skip_serializing_if = "String::is_empty")]
    category: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct AddWordRequest {
    word: String,
    meaning: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DeleteWordRequest {
    word: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SetResponse {
    current_set: Vec<Word>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: Option<String>,
}

/// Talks to the quiz server over its JSON API.
pub struct HttpBackend {
    url: String,
    timeout: String,
}

impl Default for HttpBackend {
    fn default() -> HttpBackend {
        return HttpBackend {
            url: Config::get(ConfigKey::ServerURL),
            timeout: Config::get(ConfigKey::RequestTimeout),
        };
    }
}

impl HttpBackend {
    fn timeout(&self) -> Result<Duration> {
        return Ok(Duration::from_millis(self.timeout.parse::<u64>()?));
    }

    fn endpoint(&self, path: &str) -> String {
        return format!("{url}/api/{path}", url = self.url.trim_end_matches('/'));
    }

    async fn get<T: DeserializeOwned + Send>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let res = reqwest::Client::new()
            .get(self.endpoint(path))
            .query(query)
            .timeout(self.timeout()?)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                path,
                status = res.status().as_u16(),
                "Quiz server returned an error"
            );
            bail!(format!(
                "Quiz server returned {} for {path}",
                res.status().as_u16()
            ));
        }

        return Ok(res.json::<T>().await?);
    }

    async fn post<B: serde::Serialize + Sync, T: DeserializeOwned + Send>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let res = reqwest::Client::new()
            .post(self.endpoint(path))
            .json(body)
            .timeout(self.timeout()?)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                path,
                status = res.status().as_u16(),
                "Quiz server returned an error"
            );
            bail!(format!(
                "Quiz server returned {} for {path}",
                res.status().as_u16()
            ));
        }

        let body = res.json::<T>().await?;
        return Ok(body);
    }
}

#[async_trait]
impl WordBackend for HttpBackend {
    #[allow(clippy::implicit_return)]
    async fn init(&self, session_id: Option<String>) -> Result<InitPayload> {
        let mut query = vec![];
        if let Some(session_id) = &session_id {
            query.push(("session_id", session_id.as_str()));
        }

        let payload = self.get::<InitPayload>("init", &query).await?;
        if payload.session_id.is_empty() {
            bail!("Quiz server did not return a session id");
        }

        tracing::debug!(
            session_id = %payload.session_id,
            words = payload.current_set.len(),
            "Session initialized"
        );
        return Ok(payload);
    }

    #[allow(clippy::implicit_return)]
    async fn check_answer(&self, req: AnswerRequest) -> Result<AnswerVerdict> {
        return self.post("check-answer", &req).await;
    }

    #[allow(clippy::implicit_return)]
    async fn next_word(&self, session_id: &str, current_index: usize) -> Result<Transition> {
        let req = NextWordRequest {
            session_id: session_id.to_string(),
            current_index,
        };

        let transition = self.post::<_, Transition>("next-word", &req).await?;
        tracing::debug!(index = current_index, transition = ?transition, "Next word");
        return Ok(transition);
    }

    #[allow(clippy::implicit_return)]
    async fn load_sheet(&self, session_id: &str, mode: StudyMode) -> Result<Vec<Word>> {
        let path = match mode {
            StudyMode::BaseForm => "load-words-sheet",
            StudyMode::PastTense => "load-ed-sheet",
        };
        let req = SessionRequest {
            session_id: session_id.to_string(),
        };

        let res = self.post::<_, SetResponse>(path, &req).await?;
        return Ok(res.current_set);
    }

    #[allow(clippy::implicit_return)]
    async fn next_nine_words(&self, session_id: &str, category: &str) -> Result<Vec<Word>> {
        let req = NextNineRequest {
            session_id: session_id.to_string(),
            category: category.to_string(),
        };

        let res = self
            .post::<_, SetResponse>("next-nine-words", &req)
            .await?;
        return Ok(res.current_set);
    }

    #[allow(clippy::implicit_return)]
    async fn repeat_nine_words(&self, session_id: &str) -> Result<Vec<Word>> {
        let req = SessionRequest {
            session_id: session_id.to_string(),
        };

        let res = self
            .post::<_, SetResponse>("repeat-nine-words", &req)
            .await?;
        return Ok(res.current_set);
    }

    #[allow(clippy::implicit_return)]
    async fn add_word(&self, word: &str, meaning: &str) -> Result<Option<String>> {
        let req = AddWordRequest {
            word: word.to_string(),
            meaning: meaning.to_string(),
        };

        let res = self.post::<_, MessageResponse>("add-word", &req).await?;
        return Ok(res.message);
    }

    #[allow(clippy::implicit_return)]
    async fn delete_word(&self, word: &str) -> Result<Option<String>> {
        let req = DeleteWordRequest {
            word: word.to_string(),
        };

        let res = self.post::<_, MessageResponse>("delete-word", &req).await?;
        return Ok(res.message);
    }

    #[allow(clippy::implicit_return)]
    async fn list_words(&self) -> Result<Vec<Word>> {
        return self.get("get-words", &[]).await;
    }
}
