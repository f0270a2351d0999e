// src/web/api.rs
// REST handlers

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};
use serde::Deserialize;
use std::time::Instant;
use tracing::info;

use crate::agent::{AgentDependencies, AgentResponse};
use crate::error::AssistError;
use crate::web::error::ApiResult;
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: String,
    pub customer_id: String,
    pub language: String,
    pub erp_business_entity_id: i64,
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Run the agent over one natural-language query
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<AgentResponse>> {
    let Query(params) = params.map_err(|e| AssistError::InvalidInput(e.body_text()))?;

    let query = params.query.trim();
    if query.is_empty() {
        return Err(AssistError::InvalidInput("query must not be empty".into()).into());
    }

    let start_time = Instant::now();
    let deps = AgentDependencies::new(params.customer_id, params.language, params.erp_business_entity_id);
    let response = state.agent.run(query, &deps).await?;

    info!(
        kind = response.kind(),
        duration_ms = start_time.elapsed().as_millis() as u64,
        "Search complete"
    );

    Ok(Json(response))
}
