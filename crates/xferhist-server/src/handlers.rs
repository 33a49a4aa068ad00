use std::time::Instant;

use axum::{
    Json,
    extract::{RawQuery as QueryString, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use xferhist_api::{ApiError, TransferResponse};
use xferhist_search::RawQuery;

use crate::server::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

/// `GET /v2/history/get_transfers`
pub async fn get_transfers(
    State(state): State<AppState>,
    QueryString(query): QueryString,
) -> Result<Json<TransferResponse>, ApiError> {
    let started = Instant::now();
    let raw = RawQuery::parse(query.as_deref().unwrap_or_default());

    let page = state.engine.get_transfers(&raw).await.map_err(|err| {
        tracing::warn!(
            error = %err,
            parameter = err.parameter().unwrap_or_default(),
            "get_transfers failed"
        );
        ApiError::from(err)
    })?;

    let query_time_ms = started.elapsed().as_secs_f64() * 1000.0;
    tracing::info!(
        total = %page.total,
        returned = page.projection.len(),
        query_time_ms,
        "get_transfers served"
    );
    Ok(Json(TransferResponse::from_page(page, query_time_ms)))
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("route not found")
}
