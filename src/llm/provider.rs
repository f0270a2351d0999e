// src/llm/provider.rs
// LLM client abstraction

use anyhow::Result;
use async_trait::async_trait;

use super::{ChatResult, Message, Tool};

/// Trait for LLM clients; the agent only talks to this
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one chat completion request
    async fn chat(&self, messages: Vec<Message>, tools: Option<Vec<Tool>>) -> Result<ChatResult>;

    /// Model identifier, for logging
    fn model_name(&self) -> String;
}
