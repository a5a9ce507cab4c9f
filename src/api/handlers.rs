//! API handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::api::AppState;
use crate::types::{Airport, SEARCH_LIMIT};
use crate::{Error, Result};

/// Health check with dataset size
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let airports = state.store.count().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        airports,
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub airports: u64,
}

/// Substring search over airport name and ident
///
/// Results are capped at [`SEARCH_LIMIT`] rows in database order. When `q`
/// is repeated only its first value is used.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Airport>>> {
    let query = first_value(&params, "q")
        .filter(|q| !q.is_empty())
        .ok_or_else(|| Error::invalid_query("Query parameter 'q' is required"))?;

    let airports = state.store.search(query, SEARCH_LIMIT).await?;

    Ok(Json(airports))
}

fn first_value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
