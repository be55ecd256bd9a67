//! HTTP and WebSocket handlers.

pub mod http;
pub mod websocket;

pub use http::{get_messages, get_stats, health_check, index};
pub use websocket::websocket_handler;
