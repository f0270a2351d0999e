// src/error.rs
// Error types shared by the agent, the downstream clients and the web layer

use thiserror::Error;

/// Main error type for the assistant library
#[derive(Error, Debug)]
pub enum AssistError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("agent error: {0}")]
    Agent(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Result using AssistError
pub type Result<T> = std::result::Result<T, AssistError>;

impl AssistError {
    /// True when the failure came from an upstream service rather than the caller
    pub fn is_upstream(&self) -> bool {
        matches!(self, AssistError::Llm(_) | AssistError::Agent(_))
    }
}
