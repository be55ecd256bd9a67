//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::stream::StreamExt;
use serde::Deserialize;

use crate::{
    domain::Username,
    ui::{session::ConnectionSession, state::AppState},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Display name bound to the connection; absent or empty means "Anonymous"
    pub username: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    let username = Username::from_optional(query.username);
    tracing::debug!("Upgrading connection for '{}'", username);

    ws.on_upgrade(move |socket| handle_socket(socket, state, username))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, username: Username) {
    let (sender, receiver) = socket.split();
    let mut session = ConnectionSession::new(state, username);
    session.run(sender, receiver).await;
}
