// src/search.rs
// Google Custom Search lookup of a product's cable connectors

use crate::extract::extract_connector_types;
use crate::http::DownstreamFailure;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const GOOGLE_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Results requested per search
pub const SEARCH_RESULTS: u32 = 5;

/// Snippets passed on to the model
pub const SNIPPETS_FOR_AGENT: usize = 3;

const NOT_CONFIGURED: &str =
    "Google Custom Search not configured. Set GOOGLE_API_KEY and GOOGLE_CSE_ID environment variables.";

/// Outcome of `search_product_info` as seen by the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSearch {
    pub success: bool,
    pub connector_types: Vec<String>,
    pub snippets: Vec<String>,
    pub error: Option<String>,
}

impl ProductSearch {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            connector_types: Vec::new(),
            snippets: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Google Custom Search client
pub struct GoogleSearchClient {
    api_key: String,
    cx: String,
    endpoint: String,
    client: reqwest::Client,
}

impl GoogleSearchClient {
    pub fn new(client: reqwest::Client, api_key: String, cx: String) -> Self {
        Self {
            api_key,
            cx,
            endpoint: GOOGLE_SEARCH_URL.to_string(),
            client,
        }
    }

    /// Point the client at a different search endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Raw search response JSON
    pub async fn search_raw(&self, query: &str, num_results: u32) -> Result<Value, DownstreamFailure> {
        let start_time = Instant::now();
        let num = num_results.min(10).to_string(); // API limit

        debug!(query = %query, num = %num, "Executing Google search");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cx.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: Value = response.json().await?;
        let results = data.get("items").and_then(Value::as_array).map(Vec::len).unwrap_or(0);

        info!(
            query = %query,
            results = results,
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Google search complete"
        );

        Ok(data)
    }
}

/// First `limit` item snippets of a search response
pub fn top_snippets(data: &Value, limit: usize) -> Vec<String> {
    data.get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .take(limit)
                .filter_map(|item| item.get("snippet").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Human-readable message for a failed search
pub fn failure_message(failure: &DownstreamFailure) -> String {
    match failure {
        DownstreamFailure::Status(status) => {
            let mut msg = format!("Google API HTTP error: {}", status.as_u16());
            match *status {
                StatusCode::TOO_MANY_REQUESTS => msg.push_str(" - Rate limit exceeded"),
                StatusCode::FORBIDDEN => msg.push_str(" - Invalid API key or CSE ID"),
                _ => {}
            }
            msg
        }
        DownstreamFailure::Timeout => "Google API request timed out".to_string(),
        DownstreamFailure::Other(e) => format!("Unexpected error: {}", e),
    }
}

/// Search the web for a product and guess its connector types
pub async fn search_product_info(client: Option<&GoogleSearchClient>, product_query: &str) -> ProductSearch {
    let Some(client) = client else {
        warn!("search_product_info called without Google Custom Search configured");
        return ProductSearch::failed(NOT_CONFIGURED);
    };

    match client.search_raw(product_query, SEARCH_RESULTS).await {
        Ok(data) => ProductSearch {
            success: true,
            connector_types: extract_connector_types(&data),
            snippets: top_snippets(&data, SNIPPETS_FOR_AGENT),
            error: None,
        },
        Err(failure) => {
            let msg = failure_message(&failure);
            warn!(error = %msg, "Product search failed");
            ProductSearch::failed(msg)
        }
    }
}
