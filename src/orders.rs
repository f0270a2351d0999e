// src/orders.rs
// Order status client: order ID extraction, lookup and response cleanup

use crate::agent::AgentDependencies;
use crate::extract::{ProcessedOrder, extract_order_id, process_order_response};
use crate::http::{DownstreamFailure, ErrorPayload};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Result of an order status lookup as handed to the model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OrderLookup {
    Found(Box<ProcessedOrder>),
    Failed(ErrorPayload),
}

/// Order management API client
pub struct OrderClient {
    client: reqwest::Client,
    status_url: String,
}

impl OrderClient {
    pub fn new(client: reqwest::Client, status_url: impl Into<String>) -> Self {
        Self {
            client,
            status_url: status_url.into(),
        }
    }

    /// Look up the order referenced in `user_query`, or the latest order when
    /// the query names none
    #[instrument(skip(self, deps), fields(customer_id = %deps.customer_id))]
    pub async fn get_order_status(&self, deps: &AgentDependencies, user_query: &str) -> OrderLookup {
        let order_id = extract_order_id(user_query);
        match &order_id {
            Some(id) => debug!(order_id = %id, "Extracted order ID"),
            None => debug!("No order ID found, fetching latest order"),
        }

        match self.fetch(deps, order_id.as_deref()).await {
            Ok(raw) => {
                let processed = process_order_response(&raw);
                debug!(order = ?processed, "Processed order data");
                OrderLookup::Found(Box::new(processed))
            }
            Err(failure) => OrderLookup::Failed(failure_payload(&failure)),
        }
    }

    /// Raw order record from the API
    pub async fn fetch(
        &self,
        deps: &AgentDependencies,
        order_id: Option<&str>,
    ) -> Result<Value, DownstreamFailure> {
        let start_time = Instant::now();

        let business_entity = deps.erp_business_entity_id.to_string();
        let mut params = vec![
            ("customerId", deps.customer_id.as_str()),
            ("language", deps.language.as_str()),
            ("erpBusinessEntityId", business_entity.as_str()),
        ];
        if let Some(id) = order_id {
            params.push(("orderId", id));
        }

        let response = self
            .client
            .get(&self.status_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let data: Value = response.json().await?;

        info!(
            order_id = ?order_id,
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Order status fetched"
        );
        debug!(raw = %data, "Raw order status response");

        Ok(data)
    }
}

/// Tool payload for a failed order lookup
pub fn failure_payload(failure: &DownstreamFailure) -> ErrorPayload {
    let payload = match failure {
        DownstreamFailure::Status(status) => {
            let mut error = format!("API error: {}", status.as_u16());
            if *status == StatusCode::NOT_FOUND {
                error.push_str(" - Order not found");
            }
            ErrorPayload::new(error, "Could not fetch order status")
        }
        DownstreamFailure::Timeout => {
            ErrorPayload::new("timeout", "Order status API request timed out")
        }
        DownstreamFailure::Other(e) => {
            ErrorPayload::new("unknown", format!("Unexpected error: {}", e))
        }
    };
    warn!(error = %payload.error, message = %payload.message, "Order status lookup failed");
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_payload() {
        let payload = failure_payload(&DownstreamFailure::Status(StatusCode::NOT_FOUND));
        assert_eq!(payload.error, "API error: 404 - Order not found");
        assert_eq!(payload.message, "Could not fetch order status");
    }

    #[test]
    fn test_server_error_payload() {
        let payload = failure_payload(&DownstreamFailure::Status(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(payload.error, "API error: 500");
    }

    #[test]
    fn test_timeout_payload() {
        let payload = failure_payload(&DownstreamFailure::Timeout);
        assert_eq!(payload.error, "timeout");
        assert_eq!(payload.message, "Order status API request timed out");
    }

    #[test]
    fn test_unknown_payload() {
        let payload = failure_payload(&DownstreamFailure::Other("connection reset".into()));
        assert_eq!(payload.error, "unknown");
        assert_eq!(payload.message, "Unexpected error: connection reset");
    }

    #[test]
    fn test_lookup_serializes_untagged() {
        let failed = OrderLookup::Failed(ErrorPayload::new("timeout", "slow"));
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"error": "timeout", "message": "slow"})
        );

        let found = OrderLookup::Found(Box::new(process_order_response(&json!({"orderId": "1", "status": 10}))));
        let value = serde_json::to_value(&found).unwrap();
        assert_eq!(value["status"], "Received");
        assert_eq!(value["order_id"], "1");
    }

    #[tokio::test]
    async fn test_unreachable_api_reports_failure() {
        let client = OrderClient::new(reqwest::Client::new(), "http://127.0.0.1:1/OrderStatus");
        let deps = AgentDependencies::new("C1", "en-GB", 9);
        match client.get_order_status(&deps, "order 12345").await {
            OrderLookup::Failed(payload) => assert!(payload.error == "unknown" || payload.error == "timeout"),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
