//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetRecentMessagesUseCase, GetStatsUseCase,
    SendMessageUseCase,
};

use super::{
    handler::{get_messages, get_stats, health_check, index, websocket_handler},
    signal::shutdown_signal,
    state::{AppState, SessionConfig},
};

/// WebSocket relay server
///
/// The broadcast hub must be running (see [`crate::usecase::BroadcastHub::run`])
/// for messages to be relayed; the server only accepts connections and serves
/// the HTTP endpoints.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     disconnect_client_usecase,
///     send_message_usecase,
///     get_recent_messages_usecase,
///     get_stats_usecase,
///     session_config,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_client_usecase` - UseCase for client connection
    /// * `disconnect_client_usecase` - UseCase for client disconnection
    /// * `send_message_usecase` - UseCase for forwarding messages to the hub
    /// * `get_recent_messages_usecase` - UseCase for reading history
    /// * `get_stats_usecase` - UseCase for reading statistics
    /// * `session` - Per-session settings
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        get_recent_messages_usecase: Arc<GetRecentMessagesUseCase>,
        get_stats_usecase: Arc<GetStatsUseCase>,
        session: SessionConfig,
    ) -> Self {
        Self {
            app_state: Arc::new(AppState {
                connect_client_usecase,
                disconnect_client_usecase,
                send_message_usecase,
                get_recent_messages_usecase,
                get_stats_usecase,
                session,
            }),
        }
    }

    /// Build the router with all endpoints
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index))
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/messages", get(get_messages))
            .route("/stats", get(get_stats))
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Run the relay server until Ctrl+C
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Relay server listening on {}", listener.local_addr()?);
        tracing::info!("Visit http://{} to access the chat", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
