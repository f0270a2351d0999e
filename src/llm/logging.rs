// src/llm/logging.rs
// Per-request LLM logging helpers

use super::types::{ToolCall, Usage};
use tracing::{debug, info};

pub fn log_usage(request_id: &str, usage: &Usage) {
    info!(
        request_id = %request_id,
        prompt_tokens = usage.prompt_tokens,
        completion_tokens = usage.completion_tokens,
        total_tokens = usage.total_tokens,
        "OpenRouter usage stats"
    );
}

pub fn log_tool_calls(request_id: &str, tool_calls: &[ToolCall]) {
    info!(
        request_id = %request_id,
        tool_count = tool_calls.len(),
        tools = ?tool_calls.iter().map(|tc| &tc.function.name).collect::<Vec<_>>(),
        "Model requested tool calls"
    );
    for tc in tool_calls {
        debug!(
            request_id = %request_id,
            tool = %tc.function.name,
            call_id = %tc.id,
            args = %tc.function.arguments,
            "Tool call"
        );
    }
}

pub fn log_completion(request_id: &str, duration_ms: u64, content_len: usize, tool_call_count: usize) {
    info!(
        request_id = %request_id,
        duration_ms = duration_ms,
        content_len = content_len,
        tool_calls = tool_call_count,
        "Chat round complete"
    );
}
