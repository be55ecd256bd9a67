//! UseCase 層
//!
//! リレーのアプリケーション操作を提供します。
//! UI 層はこのモジュールの UseCase のみを介してドメインにアクセスします。

pub mod broadcast_hub;
pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod get_recent_messages;
pub mod get_stats;
pub mod send_message;

pub use broadcast_hub::{BroadcastHub, FanOutReport, HubHandle, InboundMessage};
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::SendMessageError;
pub use get_recent_messages::GetRecentMessagesUseCase;
pub use get_stats::{GetStatsUseCase, Stats};
pub use send_message::SendMessageUseCase;
