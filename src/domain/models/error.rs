use thiserror::Error;

/// Errors surfaced by the quiz controller.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The session could not be started. Nothing works without one.
    #[error("Failed to start the quiz: {0}")]
    Initialization(anyhow::Error),
    /// A request after startup failed. State is left as it was, so the same
    /// action can be retried.
    #[error("Request to the quiz server failed: {0}")]
    Request(anyhow::Error),
    #[error("Answer is empty")]
    EmptyInput,
    #[error("No words are loaded yet")]
    NoActiveSet,
    #[error("Hold on, moving to the next word")]
    Busy,
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}
