//! WebSocket frame DTOs.

use serde::{Deserialize, Serialize};

/// A relayed message as seen by clients.
///
/// The browser UI depends on exactly these four fields and names. The same
/// shape is returned by `GET /messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: u64,
    pub username: String,
    pub text: String,
    /// RFC 3339 timestamp assigned by the relay
    pub timestamp: String,
}

/// Payload sent by a client.
///
/// Clients usually send the full message shape; only `text` is used. The
/// embedded `username` is accepted but always replaced by the name bound to
/// the connection, and any `id` / `timestamp` are ignored. A missing or
/// `null` text is relayed as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InboundMessageDto {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}
