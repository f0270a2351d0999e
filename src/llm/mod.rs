// src/llm/mod.rs
// Hosted LLM inference client (OpenRouter, OpenAI-compatible)

mod http_client;
mod logging;
mod openai_compat;
mod openrouter;
mod provider;
mod types;

pub use http_client::{LlmHttpClient, RetryPolicy};
pub use openai_compat::{ChatRequest, parse_chat_response};
pub use openrouter::OpenRouterClient;
pub use provider::LlmClient;
pub use types::{ChatResult, FunctionCall, FunctionDef, Message, Tool, ToolCall, Usage};
