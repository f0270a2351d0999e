// src/llm/openai_compat/response.rs
// OpenAI-compatible chat response parsing

use crate::llm::{ChatResult, ToolCall, Usage};
use anyhow::{Result, anyhow};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ResponseChoice>,
    usage: Option<Usage>,
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

/// OpenRouter reports some upstream failures inside a 200 response
#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    code: Option<serde_json::Value>,
    message: String,
}

/// Parse an OpenAI-compatible chat response into a ChatResult
pub fn parse_chat_response(response_body: &str, request_id: &str, duration_ms: u64) -> Result<ChatResult> {
    let data: ChatResponse = serde_json::from_str(response_body)
        .map_err(|e| anyhow!("Failed to parse chat response: {}", e))?;

    if let Some(err) = data.error {
        return Err(anyhow!(
            "Provider error{}: {}",
            err.code.map(|c| format!(" {}", c)).unwrap_or_default(),
            err.message
        ));
    }

    let (content, tool_calls) = match data.choices.into_iter().next() {
        Some(choice) => (choice.message.content, choice.message.tool_calls),
        None => (None, None),
    };

    Ok(ChatResult {
        request_id: request_id.to_owned(),
        content,
        tool_calls,
        usage: data.usage,
        duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_response() {
        let json = r#"{
            "choices": [{"message": {"content": "Hello"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;

        let result = parse_chat_response(json, "req-1", 100).unwrap();
        assert_eq!(result.request_id, "req-1");
        assert_eq!(result.content.as_deref(), Some("Hello"));
        assert!(result.tool_calls.is_none());
        assert_eq!(result.usage.unwrap().total_tokens, 15);
        assert_eq!(result.duration_ms, 100);
    }

    #[test]
    fn test_parse_tool_calls() {
        let json = r#"{
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [
                        {"id": "call_1", "type": "function", "function": {"name": "get_cable_ends_a", "arguments": "{}"}},
                        {"id": "call_2", "type": "function", "function": {"name": "get_cable_ends_b", "arguments": "{\"cable_end_a\":\"HDMI Male\"}"}}
                    ]
                }
            }]
        }"#;

        let result = parse_chat_response(json, "req-2", 0).unwrap();
        let calls = result.tool_calls.unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].function.name, "get_cable_ends_a");
        assert_eq!(calls[1].id, "call_2");
        assert_eq!(calls[1].function.arguments, r#"{"cable_end_a":"HDMI Male"}"#);
    }

    #[test]
    fn test_parse_empty_choices() {
        let result = parse_chat_response(r#"{"choices": [], "usage": null}"#, "r", 0).unwrap();
        assert!(result.content.is_none());
        assert!(result.tool_calls.is_none());
    }

    #[test]
    fn test_parse_embedded_provider_error() {
        let json = r#"{"error": {"code": 502, "message": "upstream overloaded"}}"#;
        let err = parse_chat_response(json, "r", 0).unwrap_err().to_string();
        assert!(err.contains("502"));
        assert!(err.contains("upstream overloaded"));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_chat_response("not json", "r", 0).is_err());
    }
}
