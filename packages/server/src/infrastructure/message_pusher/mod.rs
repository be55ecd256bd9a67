//! メッセージ送信（通知）の実装
//!
//! ## 実装
//!
//! - `channel`: クライアントごとの有界キューを使った実装
//!
//! ハブはキューへの push のみを行い、WebSocket への書き込みは
//! 各セッションがキューを drain して行います。

pub mod channel;

pub use channel::{ChannelSink, OutboundReceiver};
