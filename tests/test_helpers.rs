// tests/test_helpers.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use cable_assist::config::EnvConfig;
use cable_assist::llm::{ChatResult, LlmClient, Message, Tool, ToolCall};

/// LLM stand-in that replays canned results and records every request
pub struct ScriptedLlm {
    script: Mutex<Vec<ChatResult>>,
    pub seen: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedLlm {
    pub fn new(mut script: Vec<ChatResult>) -> Arc<Self> {
        script.reverse();
        Arc::new(Self {
            script: Mutex::new(script),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.seen.lock().unwrap().clone()
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
            .ok_or_else(|| anyhow::anyhow!("API error 503 Service Unavailable: upstream overloaded"))
    }

    fn model_name(&self) -> String {
        "scripted".to_string()
    }
}

/// A model round that requests the given tool calls
pub fn tool_round(calls: Vec<ToolCall>) -> ChatResult {
    ChatResult {
        tool_calls: Some(calls),
        ..Default::default()
    }
}

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Config built only from `pairs`, ignoring the process environment
pub fn test_config(pairs: &[(&str, &str)]) -> EnvConfig {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EnvConfig::from_lookup(|key| map.get(key).cloned())
}

/// Query strings captured by a stub endpoint
pub type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;
