// src/llm/openrouter.rs
// OpenRouter chat completions client (non-streaming)

use crate::config::LlmConfig;
use crate::llm::http_client::LlmHttpClient;
use crate::llm::logging;
use crate::llm::openai_compat::{ChatRequest, parse_chat_response};
use crate::llm::provider::LlmClient;
use crate::llm::{ChatResult, Message, Tool};
use anyhow::Result;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{Span, debug, info, instrument};
use uuid::Uuid;

const APP_TITLE: &str = "cable-assist";

/// OpenRouter API client
pub struct OpenRouterClient {
    api_key: String,
    model: String,
    url: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    http: LlmHttpClient,
}

impl OpenRouterClient {
    pub fn new(api_key: String, config: &LlmConfig) -> Self {
        Self {
            api_key,
            model: config.model.clone(),
            url: config.base_url.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            http: LlmHttpClient::new(Duration::from_secs(120), Duration::from_secs(15)),
        }
    }

    pub fn with_http(mut self, http: LlmHttpClient) -> Self {
        self.http = http;
        self
    }

    #[instrument(skip(self, messages, tools), fields(request_id, model = %self.model, message_count = messages.len()))]
    async fn complete(&self, messages: Vec<Message>, tools: Option<Vec<Tool>>) -> Result<ChatResult> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();
        Span::current().record("request_id", &request_id);

        info!(
            request_id = %request_id,
            message_count = messages.len(),
            tool_count = tools.as_ref().map(|t| t.len()).unwrap_or(0),
            "Starting OpenRouter chat request"
        );

        let request = ChatRequest::new(&self.model, messages)
            .with_tools(tools)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        let body = serde_json::to_string(&request)?;
        debug!(request_id = %request_id, "OpenRouter request: {}", body);

        let headers = [("X-Title", APP_TITLE.to_string())];
        let response_body = self
            .http
            .post_json(&request_id, &self.url, &self.api_key, &headers, body)
            .await?;

        let duration_ms = start_time.elapsed().as_millis() as u64;
        let result = parse_chat_response(&response_body, &request_id, duration_ms)?;

        if let Some(ref usage) = result.usage {
            logging::log_usage(&request_id, usage);
        }
        if let Some(tool_calls) = result.requested_tools() {
            logging::log_tool_calls(&request_id, tool_calls);
        }
        logging::log_completion(
            &request_id,
            duration_ms,
            result.content.as_ref().map(|c| c.len()).unwrap_or(0),
            result.requested_tools().map(|t| t.len()).unwrap_or(0),
        );

        Ok(result)
    }
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    async fn chat(&self, messages: Vec<Message>, tools: Option<Vec<Tool>>) -> Result<ChatResult> {
        self.complete(messages, tools).await
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvConfig;
    use crate::llm::RetryPolicy;

    fn llm_config() -> LlmConfig {
        EnvConfig::from_lookup(|_| None).llm
    }

    #[test]
    fn test_model_from_config() {
        let client = OpenRouterClient::new("key".into(), &llm_config());
        assert_eq!(client.model_name(), "mistralai/mistral-large-2512");
        assert_eq!(client.url, "https://openrouter.ai/api/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_error() {
        let mut config = llm_config();
        config.base_url = "http://127.0.0.1:1/chat/completions".into();
        let client = OpenRouterClient::new("key".into(), &config).with_http(
            LlmHttpClient::new(Duration::from_millis(300), Duration::from_millis(100))
                .with_retry(RetryPolicy::none()),
        );
        let result = client.chat(vec![Message::user("hi")], None).await;
        assert!(result.is_err());
    }
}
