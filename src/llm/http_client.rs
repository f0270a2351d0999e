// src/llm/http_client.rs
// HTTP transport for the LLM provider with retry on transient failures

use anyhow::{Result, anyhow};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::warn;

/// Retry settings for provider calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles each time
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_backoff: Duration::ZERO,
        }
    }

    /// Backoff before retry number `retry` (0-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        self.base_backoff.saturating_mul(2u32.saturating_pow(retry))
    }
}

/// Rate limiting and server-side failures are worth another attempt
pub fn is_transient_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// HTTP client shared by provider calls
pub struct LlmHttpClient {
    client: Client,
    pub retry: RetryPolicy,
}

impl LlmHttpClient {
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// POST a JSON body with extra headers, retrying transient failures.
    /// Returns the response body as text on success.
    pub async fn post_json(
        &self,
        request_id: &str,
        url: &str,
        api_key: &str,
        headers: &[(&'static str, String)],
        body: String,
    ) -> Result<String> {
        let mut retry = 0;

        loop {
            let mut request = self
                .client
                .post(url)
                .bearer_auth(api_key)
                .header("Content-Type", "application/json")
                .body(body.clone());
            for (name, value) in headers {
                request = request.header(*name, value);
            }

            let can_retry = retry < self.retry.max_retries;
            let backoff = self.retry.backoff(retry);

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.text().await?);
                    }

                    let error_body = response.text().await.unwrap_or_default();
                    if !(can_retry && is_transient_status(status)) {
                        return Err(anyhow!("API error {}: {}", status, error_body));
                    }
                    warn!(
                        request_id = %request_id,
                        status = %status,
                        error = %error_body,
                        "Transient error, retrying in {:?}...",
                        backoff
                    );
                }
                // Only connect/timeout failures are safe to resend
                Err(e) if can_retry && (e.is_connect() || e.is_timeout()) => {
                    warn!(
                        request_id = %request_id,
                        error = %e,
                        "Request failed (connect/timeout), retrying in {:?}...",
                        backoff
                    );
                }
                Err(e) => return Err(anyhow!("Request failed: {}", e)),
            }

            tokio::time::sleep(backoff).await;
            retry += 1;
        }
    }
}
