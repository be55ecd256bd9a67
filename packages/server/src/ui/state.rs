//! Server state shared by all handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetRecentMessagesUseCase, GetStatsUseCase,
    SendMessageUseCase,
};

/// Per-session settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// History replayed to a new client before live messages
    pub history_replay_limit: i64,
    /// Capacity of the client's outbound queue
    pub outbound_capacity: usize,
}

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// GetRecentMessagesUseCase（直近メッセージ取得のユースケース）
    pub get_recent_messages_usecase: Arc<GetRecentMessagesUseCase>,
    /// GetStatsUseCase（統計情報取得のユースケース）
    pub get_stats_usecase: Arc<GetStatsUseCase>,
    pub session: SessionConfig,
}
