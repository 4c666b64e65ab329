use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::HeaderMap,
};
use std::sync::Arc;
use tickerhub_clock::Clock;
use tickerhub_core::{ExchangeId, SnapshotRequest};
use tracing::{debug, warn};

use crate::presentation::rest::{ApiError, dto::*};

use super::AppState;

pub const WEBHOOK_TOKEN_HEADER: &str = "x-webhook-token";

/// GET /health
pub async fn health<C: Clock>(State(state): State<Arc<AppState<C>>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: state.clock.now(),
    })
}

/// GET /exchanges
pub async fn exchanges() -> Json<ExchangesResponse> {
    Json(ExchangesResponse {
        exchanges: ExchangeId::ALL.iter().map(ExchangeId::as_str).collect(),
    })
}

/// GET /markets/{exchange} and GET /{exchange}/markets
pub async fn markets<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    Path(exchange): Path<String>,
    query: Result<Query<SnapshotRequest>, QueryRejection>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let Query(request) = query?;
    serve_snapshot(&state, &exchange, &request).await
}

/// POST /webhooks/{exchange}
///
/// The token is checked before the body is looked at.
pub async fn webhook<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    Path(exchange): Path<String>,
    headers: HeaderMap,
    body: Result<Json<SnapshotRequest>, JsonRejection>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    if let Some(expected) = state.webhook_token.as_deref() {
        let given = headers
            .get(WEBHOOK_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());
        if given != Some(expected) {
            warn!(exchange = %exchange, "webhook rejected: token mismatch");
            return Err(ApiError::unauthorized());
        }
    }

    let Json(request) = body?;
    serve_snapshot(&state, &exchange, &request).await
}

async fn serve_snapshot<C: Clock>(
    state: &AppState<C>,
    exchange: &str,
    request: &SnapshotRequest,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let exchange: ExchangeId = exchange.parse()?;
    let key = state.cache.builder().resolve(exchange, request)?;
    debug!(?key, "snapshot requested");

    let snapshot = state.cache.get(&key).await?;
    Ok(Json(SnapshotResponse(snapshot)))
}
