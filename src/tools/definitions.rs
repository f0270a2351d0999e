// src/tools/definitions.rs
// Function tool schemas exposed to the model

use crate::llm::Tool;
use serde_json::json;

pub const GET_CABLE_ENDS_A: &str = "get_cable_ends_a";
pub const GET_CABLE_ENDS_B: &str = "get_cable_ends_b";
pub const SEARCH_PRODUCT_INFO: &str = "search_product_info";
pub const GET_ORDER_STATUS: &str = "get_order_status";

/// The four lookup tools, in the order the prompt introduces them
pub fn agent_tools() -> Vec<Tool> {
    vec![
        Tool::function(
            SEARCH_PRODUCT_INFO,
            "Search the web for a product's cable information. Returns detected connector \
             types and the top result snippets.",
            json!({
                "type": "object",
                "properties": {
                    "product_query": {
                        "type": "string",
                        "description": "Search query, e.g. \"iPhone 15 Pro cable connectors\""
                    }
                },
                "required": ["product_query"]
            }),
        ),
        Tool::function(
            GET_CABLE_ENDS_A,
            "Get all available cable connector types for the first end of a cable.",
            json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        ),
        Tool::function(
            GET_CABLE_ENDS_B,
            "Get the connector types that can be combined with the selected first-end connector.",
            json!({
                "type": "object",
                "properties": {
                    "cable_end_a": {
                        "type": "string",
                        "description": "Exact connector name returned by get_cable_ends_a"
                    }
                },
                "required": ["cable_end_a"]
            }),
        ),
        Tool::function(
            GET_ORDER_STATUS,
            "Fetch order status. The order ID is extracted from the query; without one the \
             latest order is returned.",
            json!({
                "type": "object",
                "properties": {
                    "user_query": {
                        "type": "string",
                        "description": "The user's full original query"
                    }
                },
                "required": ["user_query"]
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names() {
        let names: Vec<String> = agent_tools().into_iter().map(|t| t.function.name).collect();
        assert_eq!(
            names,
            vec![SEARCH_PRODUCT_INFO, GET_CABLE_ENDS_A, GET_CABLE_ENDS_B, GET_ORDER_STATUS]
        );
    }

    #[test]
    fn test_required_parameters() {
        for tool in agent_tools() {
            assert_eq!(tool.tool_type, "function");
            assert_eq!(tool.function.parameters["type"], "object");
            let required = tool.function.parameters["required"].as_array().unwrap();
            for name in required {
                let name = name.as_str().unwrap();
                assert!(
                    tool.function.parameters["properties"].get(name).is_some(),
                    "{} requires undeclared {}",
                    tool.function.name,
                    name
                );
            }
        }
    }
}
