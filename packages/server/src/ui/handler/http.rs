//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::{
    config::DEFAULT_HTTP_MESSAGES_LIMIT,
    infrastructure::dto::{
        http::{HealthDto, StatsDto},
        websocket::MessageDto,
    },
    ui::state::AppState,
};

/// Query parameters for `GET /messages`
#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    /// Kept as a string so that a non-numeric value falls back to the default
    /// instead of rejecting the request.
    pub limit: Option<String>,
}

/// Resolve the `limit` query parameter.
///
/// Missing, non-numeric and non-positive values all yield
/// [`DEFAULT_HTTP_MESSAGES_LIMIT`].
pub fn parse_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_HTTP_MESSAGES_LIMIT)
}

/// Chat page
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../../static/index.html"))
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Get the most recent messages, oldest first
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessagesQuery>,
) -> Json<Vec<MessageDto>> {
    let limit = parse_limit(query.limit.as_deref());
    let messages = state.get_recent_messages_usecase.execute(limit).await;

    // Domain Model から DTO への変換
    Json(messages.into_iter().map(MessageDto::from).collect())
}

/// Get message and client counts
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsDto> {
    let stats = state.get_stats_usecase.execute().await;
    Json(stats.into())
}
