// src/agent/output.rs
// Structured output: final-result tools and plain-text fallback parsing

use super::types::{AgentResponse, CableResponse, OrderStatusResponse};
use crate::llm::{Tool, ToolCall};
use serde_json::{Value, json};

pub const FINAL_CABLE_TOOL: &str = "final_result_cable";
pub const FINAL_ORDER_TOOL: &str = "final_result_order";

/// Tools the model calls to hand back its answer
pub fn output_tools() -> Vec<Tool> {
    vec![
        Tool::function(
            FINAL_CABLE_TOOL,
            "Return the final answer for a cable query. Use empty strings when no match was found.",
            json!({
                "type": "object",
                "properties": {
                    "from_connector": {"type": "string"},
                    "to_connector": {"type": "string"}
                },
                "required": ["from_connector", "to_connector"]
            }),
        ),
        Tool::function(
            FINAL_ORDER_TOOL,
            "Return the final answer for an order status query.",
            json!({
                "type": "object",
                "properties": {
                    "summary": {"type": "string", "description": "2-3 sentence natural language summary"},
                    "order_id": {"type": ["string", "null"]}
                },
                "required": ["summary"]
            }),
        ),
    ]
}

pub fn is_output_tool(name: &str) -> bool {
    name == FINAL_CABLE_TOOL || name == FINAL_ORDER_TOOL
}

/// `None` when the call is not an output tool
pub fn parse_output_call(call: &ToolCall) -> Option<Result<AgentResponse, String>> {
    let args = call.function.arguments.trim();
    let args = if args.is_empty() { "{}" } else { args };

    let parsed = match call.function.name.as_str() {
        FINAL_CABLE_TOOL => serde_json::from_str::<CableResponse>(args).map(AgentResponse::Cable),
        FINAL_ORDER_TOOL => {
            serde_json::from_str::<OrderStatusResponse>(args).map(AgentResponse::Order)
        }
        _ => return None,
    };

    Some(parsed.map_err(|e| e.to_string()))
}

/// Accept a final answer written as JSON text instead of an output tool call
pub fn parse_text_output(content: &str) -> Result<AgentResponse, String> {
    let body = json_object_slice(content).ok_or("response did not contain a JSON object")?;
    let value: Value = serde_json::from_str(body).map_err(|e| e.to_string())?;

    if value.get("response_type").is_some() {
        return serde_json::from_value(value).map_err(|e| e.to_string());
    }
    if value.get("from_connector").is_some() {
        return serde_json::from_value(value).map(AgentResponse::Cable).map_err(|e| e.to_string());
    }
    if value.get("summary").is_some() {
        return serde_json::from_value(value).map(AgentResponse::Order).map_err(|e| e.to_string());
    }
    Err("JSON object is neither a cable nor an order response".to_string())
}

/// Outermost `{...}` in the text, which also skips markdown code fences
fn json_object_slice(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Message telling the model its answer was rejected
pub fn retry_message(error: &str) -> String {
    format!(
        "Invalid final result: {}. Fix the errors and answer again by calling {} or {}.",
        error, FINAL_CABLE_TOOL, FINAL_ORDER_TOOL
    )
}
