// src/agent/mod.rs
// Prompt-driven agent: model rounds, tool execution, structured output

pub mod output;
pub mod prompt;
mod types;

pub use types::{AgentDependencies, AgentResponse, CableResponse, OrderStatusResponse};

use crate::config::EnvConfig;
use crate::config::env::DEFAULT_MAX_ROUNDS;
use crate::error::{AssistError, Result};
use crate::llm::{LlmClient, Message, OpenRouterClient, Tool, ToolCall};
use crate::tools::Toolbox;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

pub struct Agent {
    llm: Arc<dyn LlmClient>,
    toolbox: Toolbox,
    system_prompt: String,
    max_rounds: usize,
}

impl Agent {
    pub fn new(llm: Arc<dyn LlmClient>, toolbox: Toolbox) -> Self {
        Self {
            llm,
            toolbox,
            system_prompt: prompt::system_prompt(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// OpenRouter-backed agent with live downstream clients
    pub fn from_config(config: &EnvConfig) -> Result<Self> {
        let api_key = config
            .api_keys
            .openrouter
            .clone()
            .ok_or_else(|| AssistError::Config("OPENROUTER_API_KEY is not set".into()))?;

        let llm = OpenRouterClient::new(api_key, &config.llm);
        let toolbox = Toolbox::from_config(config)?;

        Ok(Self::new(Arc::new(llm), toolbox).with_max_rounds(config.llm.max_rounds))
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn model_name(&self) -> String {
        self.llm.model_name()
    }

    fn tool_set(&self) -> Vec<Tool> {
        let mut tools = self.toolbox.definitions();
        tools.extend(output::output_tools());
        tools
    }

    /// Answer one query. Ends when the model produces a valid final result or
    /// the round budget runs out.
    #[instrument(skip(self, deps), fields(customer_id = %deps.customer_id, model = %self.llm.model_name()))]
    pub async fn run(&self, query: &str, deps: &AgentDependencies) -> Result<AgentResponse> {
        let start_time = Instant::now();
        let tools = self.tool_set();
        let mut messages = vec![Message::system(self.system_prompt.clone()), Message::user(query)];

        for round in 0..self.max_rounds {
            let result = self
                .llm
                .chat(messages.clone(), Some(tools.clone()))
                .await
                .map_err(|e| AssistError::Llm(e.to_string()))?;

            let Some(tool_calls) = result.requested_tools().map(<[ToolCall]>::to_vec) else {
                // No tool calls: the answer may still be JSON in the message text
                let content = result.content.unwrap_or_default();
                match output::parse_text_output(&content) {
                    Ok(response) => {
                        info!(round = round + 1, kind = response.kind(), "Final result from message text");
                        return Ok(response);
                    }
                    Err(e) => {
                        warn!(round = round + 1, error = %e, "Model replied without a final result");
                        messages.push(Message::assistant(Some(content)));
                        messages.push(Message::user(output::retry_message(&e)));
                        continue;
                    }
                }
            };

            info!(round = round + 1, tool_calls = tool_calls.len(), "Tool round");

            let mut rejected = HashMap::new();
            for tc in &tool_calls {
                match output::parse_output_call(tc) {
                    Some(Ok(response)) => {
                        info!(
                            round = round + 1,
                            kind = response.kind(),
                            duration_ms = start_time.elapsed().as_millis() as u64,
                            "Agent run complete"
                        );
                        return Ok(response);
                    }
                    Some(Err(e)) => {
                        warn!(tool = %tc.function.name, error = %e, "Rejected final result");
                        rejected.insert(tc.id.clone(), output::retry_message(&e));
                    }
                    None => {}
                }
            }

            let lookups: Vec<ToolCall> = tool_calls
                .iter()
                .filter(|tc| !output::is_output_tool(&tc.function.name))
                .cloned()
                .collect();
            let mut results: HashMap<String, String> =
                self.toolbox.execute_tools(deps, &lookups).await.into_iter().collect();
            results.extend(rejected);

            messages.push(Message::assistant_tool_calls(result.content.clone(), tool_calls.clone()));
            for tc in &tool_calls {
                let content = results.remove(&tc.id).unwrap_or_default();
                debug!(call_id = %tc.id, content_len = content.len(), "Tool result");
                messages.push(Message::tool_result(tc.id.clone(), content));
            }
        }

        Err(AssistError::Agent(format!(
            "model did not produce a final result within {} rounds",
            self.max_rounds
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays canned results and records every request
    struct ScriptedLlm {
        script: Mutex<Vec<ChatResult>>,
        seen: Mutex<Vec<Vec<Message>>>,
    }

    impl ScriptedLlm {
        fn new(mut script: Vec<ChatResult>) -> Self {
            script.reverse();
            Self {
                script: Mutex::new(script),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn chat(&self, messages: Vec<Message>, _tools: Option<Vec<Tool>>) -> anyhow::Result<ChatResult> {
            self.seen.lock().unwrap().push(messages);
            self.script
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| anyhow::anyhow!("script exhausted"))
        }

        fn model_name(&self) -> String {
            "scripted".into()
        }
    }

    fn calls(calls: Vec<ToolCall>) -> ChatResult {
        ChatResult {
            tool_calls: Some(calls),
            ..Default::default()
        }
    }

    fn text(content: &str) -> ChatResult {
        ChatResult {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    fn offline_agent(llm: Arc<ScriptedLlm>) -> Agent {
        let mut config = EnvConfig::from_lookup(|_| None);
        config.catalog.builtin_ends_a = true;
        Agent::new(llm, Toolbox::from_config(&config).unwrap())
    }

    fn deps() -> AgentDependencies {
        AgentDependencies::new("C1", "en-GB", 9)
    }

    #[tokio::test]
    async fn test_tool_round_then_final_result() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            calls(vec![ToolCall::function("c1", "get_cable_ends_a", "{}")]),
            calls(vec![ToolCall::function(
                "c2",
                output::FINAL_CABLE_TOOL,
                r#"{"from_connector":"HDMI Male","to_connector":"USB C Male"}"#,
            )]),
        ]));
        let agent = offline_agent(llm.clone());

        let response = agent.run("HDMI to USB-C cable", &deps()).await.unwrap();
        assert_eq!(
            response,
            AgentResponse::Cable(CableResponse {
                from_connector: "HDMI Male".into(),
                to_connector: "USB C Male".into()
            })
        );

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        let second = &seen[1];
        assert_eq!(second[0].role, "system");
        assert_eq!(second[1].content.as_deref(), Some("HDMI to USB-C cable"));
        assert_eq!(second[2].role, "assistant");
        assert_eq!(second[3].role, "tool");
        assert_eq!(second[3].tool_call_id.as_deref(), Some("c1"));
        assert!(second[3].content.as_deref().unwrap().contains("HDMI Male"));
    }

    #[tokio::test]
    async fn test_invalid_final_result_is_sent_back() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            calls(vec![ToolCall::function("c1", output::FINAL_ORDER_TOOL, r#"{"order_id":"1"}"#)]),
            calls(vec![ToolCall::function(
                "c2",
                output::FINAL_ORDER_TOOL,
                r#"{"summary":"Order 1 is Received.","order_id":"1"}"#,
            )]),
        ]));
        let agent = offline_agent(llm.clone());

        let response = agent.run("order 1", &deps()).await.unwrap();
        assert_eq!(response.kind(), "order");

        let seen = llm.seen.lock().unwrap();
        let retry = seen[1].last().unwrap();
        assert_eq!(retry.role, "tool");
        assert!(retry.content.as_deref().unwrap().starts_with("Invalid final result"));
    }

    #[tokio::test]
    async fn test_text_answer_accepted() {
        let llm = Arc::new(ScriptedLlm::new(vec![text(
            r#"{"response_type":"cable","from_connector":"","to_connector":""}"#,
        )]));
        let response = offline_agent(llm).run("a cable for my toaster", &deps()).await.unwrap();
        assert_eq!(
            response,
            AgentResponse::Cable(CableResponse {
                from_connector: String::new(),
                to_connector: String::new()
            })
        );
    }

    #[tokio::test]
    async fn test_prose_answer_gets_retry_prompt() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            text("Sure, let me check that."),
            calls(vec![ToolCall::function("c1", output::FINAL_ORDER_TOOL, r#"{"summary":"Done."}"#)]),
        ]));
        let agent = offline_agent(llm.clone());
        agent.run("where is my order?", &deps()).await.unwrap();

        let seen = llm.seen.lock().unwrap();
        let retry = seen[1].last().unwrap();
        assert_eq!(retry.role, "user");
        assert!(retry.content.as_deref().unwrap().contains(output::FINAL_CABLE_TOOL));
    }

    #[tokio::test]
    async fn test_round_budget_exhausted() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            calls(vec![ToolCall::function("c1", "get_cable_ends_a", "{}")]),
            calls(vec![ToolCall::function("c2", "get_cable_ends_a", "{}")]),
        ]));
        let agent = offline_agent(llm).with_max_rounds(2);
        let err = agent.run("HDMI", &deps()).await.unwrap_err();
        assert!(matches!(err, AssistError::Agent(_)));
        assert!(err.to_string().contains("2 rounds"));
    }

    #[tokio::test]
    async fn test_llm_failure_is_llm_error() {
        let llm = Arc::new(ScriptedLlm::new(vec![]));
        let err = offline_agent(llm).run("HDMI", &deps()).await.unwrap_err();
        assert!(matches!(err, AssistError::Llm(_)));
    }

    #[tokio::test]
    async fn test_custom_system_prompt_is_sent() {
        let llm = Arc::new(ScriptedLlm::new(vec![calls(vec![ToolCall::function(
            "c1",
            output::FINAL_ORDER_TOOL,
            r#"{"summary":"Delivered."}"#,
        )])]));
        let agent = offline_agent(llm.clone()).with_system_prompt("Answer order questions only.");
        agent.run("where is order 4711?", &deps()).await.unwrap();

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen[0][0].role, "system");
        assert_eq!(seen[0][0].content.as_deref(), Some("Answer order questions only."));
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = EnvConfig::from_lookup(|_| None);
        assert!(matches!(Agent::from_config(&config), Err(AssistError::Config(_))));
    }
}
