// src/tools/mod.rs
// Agent tool registry and dispatch

pub mod definitions;

use crate::agent::AgentDependencies;
use crate::catalog::{self, CatalogClient};
use crate::config::EnvConfig;
use crate::error::Result;
use crate::http::create_shared_client;
use crate::llm::{Tool, ToolCall};
use crate::orders::OrderClient;
use crate::search::{GoogleSearchClient, search_product_info};
use definitions::{GET_CABLE_ENDS_A, GET_CABLE_ENDS_B, GET_ORDER_STATUS, SEARCH_PRODUCT_INFO};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Deserialize)]
struct CableEndBArgs {
    cable_end_a: String,
}

#[derive(Debug, Deserialize)]
struct ProductSearchArgs {
    product_query: String,
}

#[derive(Debug, Deserialize)]
struct OrderStatusArgs {
    user_query: String,
}

/// Downstream clients the tools run against
pub struct Toolbox {
    catalog: CatalogClient,
    orders: OrderClient,
    search: Option<GoogleSearchClient>,
}

impl Toolbox {
    pub fn new(catalog: CatalogClient, orders: OrderClient, search: Option<GoogleSearchClient>) -> Self {
        Self {
            catalog,
            orders,
            search,
        }
    }

    /// Build all downstream clients over one shared connection pool
    pub fn from_config(config: &EnvConfig) -> Result<Self> {
        let client = create_shared_client(config.downstream_timeout);

        let catalog = CatalogClient::new(client.clone(), &config.catalog)?;
        let orders = OrderClient::new(client.clone(), config.orders.status_url.clone());
        let search = match (&config.api_keys.google, &config.api_keys.google_cse_id) {
            (Some(key), Some(cx)) => Some(
                GoogleSearchClient::new(client, key.clone(), cx.clone())
                    .with_endpoint(config.search.endpoint.clone()),
            ),
            _ => None,
        };

        Ok(Self::new(catalog, orders, search))
    }

    pub fn definitions(&self) -> Vec<Tool> {
        definitions::agent_tools()
    }

    /// Execute tool calls in order and return `(call_id, content)` pairs
    #[instrument(skip(self, deps, tool_calls), fields(tool_count = tool_calls.len()))]
    pub async fn execute_tools(&self, deps: &AgentDependencies, tool_calls: &[ToolCall]) -> Vec<(String, String)> {
        let mut results = Vec::with_capacity(tool_calls.len());
        for tc in tool_calls {
            let content = self.execute(deps, tc).await;
            results.push((tc.id.clone(), content));
        }
        results
    }

    /// Run one tool call; failures come back as text for the model
    pub async fn execute(&self, deps: &AgentDependencies, tc: &ToolCall) -> String {
        let start_time = Instant::now();
        let name = tc.function.name.as_str();
        let args = tc.function.arguments.as_str();

        debug!(tool = %name, call_id = %tc.id, args = %args, "Executing tool");

        let result = match name {
            GET_CABLE_ENDS_A => match self.catalog.cable_ends_a().await {
                Ok(ends) => to_json(&ends),
                Err(failure) => to_json(&catalog::failure_payload(&failure)),
            },
            GET_CABLE_ENDS_B => match parse_args::<CableEndBArgs>(name, args) {
                Ok(a) => match self.catalog.cable_ends_b(&a.cable_end_a).await {
                    Ok(ends) => to_json(&ends),
                    Err(failure) => to_json(&catalog::failure_payload(&failure)),
                },
                Err(e) => e,
            },
            SEARCH_PRODUCT_INFO => match parse_args::<ProductSearchArgs>(name, args) {
                Ok(a) => to_json(&search_product_info(self.search.as_ref(), &a.product_query).await),
                Err(e) => e,
            },
            GET_ORDER_STATUS => match parse_args::<OrderStatusArgs>(name, args) {
                Ok(a) => to_json(&self.orders.get_order_status(deps, &a.user_query).await),
                Err(e) => e,
            },
            _ => {
                warn!(tool = %name, "Model requested unknown tool");
                format!("Error: unknown tool '{}'", name)
            }
        };

        info!(
            tool = %name,
            call_id = %tc.id,
            duration_ms = start_time.elapsed().as_millis() as u64,
            result_len = result.len(),
            "Tool complete"
        );

        result
    }
}

/// Parse tool arguments; models sometimes send an empty string for "no arguments"
fn parse_args<T: DeserializeOwned>(tool: &str, arguments: &str) -> std::result::Result<T, String> {
    let raw = if arguments.trim().is_empty() { "{}" } else { arguments };
    serde_json::from_str(raw).map_err(|e| {
        warn!(tool = %tool, error = %e, "Invalid tool arguments");
        format!("Error: invalid arguments for {}: {}", tool, e)
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("Error: failed to serialize tool result: {}", e))
}
