// src/agent/types.rs
// Agent inputs and the discriminated response record

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// Per-request scope for order lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDependencies {
    pub customer_id: String,
    pub language: String,
    pub erp_business_entity_id: i64,
}

impl AgentDependencies {
    pub fn new(customer_id: impl Into<String>, language: impl Into<String>, erp_business_entity_id: i64) -> Self {
        Self {
            customer_id: customer_id.into(),
            language: language.into(),
            erp_business_entity_id,
        }
    }
}

/// Connector pair for a cable query. Empty strings mean no match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CableResponse {
    pub from_connector: String,
    pub to_connector: String,
}

/// Prose summary of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusResponse {
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_order_id")]
    pub order_id: Option<String>,
}

/// Models sometimes send the order ID as a bare number
fn lenient_order_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "order_id must be a string or null, got {}",
            other
        ))),
    }
}

/// What the agent returns, tagged by `response_type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "response_type", rename_all = "lowercase")]
pub enum AgentResponse {
    Cable(CableResponse),
    Order(OrderStatusResponse),
}

impl AgentResponse {
    pub fn kind(&self) -> &'static str {
        match self {
            AgentResponse::Cable(_) => "cable",
            AgentResponse::Order(_) => "order",
        }
    }
}
