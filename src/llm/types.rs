// src/llm/types.rs
// Chat completion wire types with tool calling support

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String, // "system" | "user" | "assistant" | "tool"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>, // For tool responses
}

impl Message {
    fn with_role(role: &str, content: Option<String>) -> Self {
        Self {
            role: role.into(),
            content,
            tool_calls: None,
            tool_call_id: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role("system", Some(content.into()))
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role("user", Some(content.into()))
    }

    pub fn assistant(content: Option<String>) -> Self {
        Self::with_role("assistant", content)
    }

    /// Assistant turn that requested tool calls
    pub fn assistant_tool_calls(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls: Some(tool_calls),
            ..Self::with_role("assistant", content)
        }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::with_role("tool", Some(content.into()))
        }
    }
}

/// Tool call from the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String, // "function"
    pub function: FunctionCall,
}

impl ToolCall {
    pub fn function(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            call_type: "function".into(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

/// Function call details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String, // JSON string
}

/// Tool definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: String, // "function"
    pub function: FunctionDef,
}

impl Tool {
    pub fn function(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            tool_type: "function".into(),
            function: FunctionDef {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

/// Function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: Value, // JSON Schema
}

/// Token usage as reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Result of one chat completion round
#[derive(Debug, Clone, Default)]
pub struct ChatResult {
    pub request_id: String,
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ToolCall>>,
    pub usage: Option<Usage>,
    pub duration_ms: u64,
}

impl ChatResult {
    /// Tool calls, treating an empty list the same as none
    pub fn requested_tools(&self) -> Option<&[ToolCall]> {
        self.tool_calls.as_deref().filter(|calls| !calls.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_result_message_shape() {
        let msg = Message::tool_result("call_1", "[]");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"role": "tool", "content": "[]", "tool_call_id": "call_1"}));
    }

    #[test]
    fn test_assistant_tool_calls_omits_null_content() {
        let msg = Message::assistant_tool_calls(None, vec![ToolCall::function("c1", "get_cable_ends_a", "{}")]);
        let value = serde_json::to_value(&msg).unwrap();
        assert!(value.get("content").is_none());
        assert_eq!(value["tool_calls"][0]["type"], "function");
        assert_eq!(value["tool_calls"][0]["function"]["name"], "get_cable_ends_a");
    }

    #[test]
    fn test_requested_tools_ignores_empty_list() {
        let result = ChatResult {
            tool_calls: Some(vec![]),
            ..Default::default()
        };
        assert!(result.requested_tools().is_none());
    }
}
