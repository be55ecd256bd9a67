//! Per-connection session.
//!
//! A session goes through `Connecting -> Active -> Closed`. On becoming active
//! it registers its client, replays recent history directly to the peer, then
//! concurrently reads inbound frames (forwarded to the broadcast hub) and
//! drains its own outbound queue (filled by the hub) to the peer.
//!
//! The session is generic over the frame sink and stream so that it can be
//! driven by a split axum `WebSocket` or by in-memory test doubles.

use std::{fmt, sync::Arc};

use axum::extract::ws::Message as WsMessage;
use futures_util::{Sink, SinkExt, Stream, StreamExt};

use crate::{
    domain::{Client, Message, Username},
    infrastructure::{
        dto::websocket::{InboundMessageDto, MessageDto},
        message_pusher::{ChannelSink, OutboundReceiver},
    },
};

use super::state::AppState;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Active,
    /// Terminal
    Closed,
}

/// Why a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// Close frame received or the stream ended
    PeerClosed,
    /// Transport error while reading
    ReadError(String),
    /// Inbound payload could not be decoded
    MalformedPayload(String),
    /// Transport error while writing
    WriteError(String),
    /// The hub closed this client's sink after a failed delivery
    Evicted,
    /// The broadcast hub is no longer running
    HubUnavailable,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PeerClosed => f.write_str("peer closed the connection"),
            Self::ReadError(e) => write!(f, "read error: {}", e),
            Self::MalformedPayload(e) => write!(f, "malformed payload: {}", e),
            Self::WriteError(e) => write!(f, "write error: {}", e),
            Self::Evicted => f.write_str("evicted by broadcast hub"),
            Self::HubUnavailable => f.write_str("broadcast hub unavailable"),
        }
    }
}

/// The read/write loop of one connected client.
pub struct ConnectionSession {
    app: Arc<AppState>,
    username: Username,
    state: SessionState,
}

impl ConnectionSession {
    pub fn new(app: Arc<AppState>, username: Username) -> Self {
        Self {
            app,
            username,
            state: SessionState::Connecting,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!(
            "Session '{}': {:?} -> {:?}",
            self.username,
            self.state,
            next
        );
        self.state = next;
    }

    /// Run the session until it closes and return why it closed.
    ///
    /// The client is always deregistered and its sink closed before returning.
    pub async fn run<W, R, E>(&mut self, mut writer: W, mut reader: R) -> CloseReason
    where
        W: Sink<WsMessage> + Unpin,
        W::Error: fmt::Display,
        R: Stream<Item = Result<WsMessage, E>> + Unpin,
        E: fmt::Display,
    {
        let (sink, mut outbound) = ChannelSink::new(self.app.session.outbound_capacity);
        let client = Client::new(self.username.clone(), Arc::new(sink));

        let history = self
            .app
            .connect_client_usecase
            .execute(client.clone(), self.app.session.history_replay_limit)
            .await;
        self.transition(SessionState::Active);

        let reason = match replay_history(&mut writer, history).await {
            Ok(count) => {
                tracing::debug!("Sent {} history message(s) to '{}'", count, self.username);
                self.relay(&mut writer, &mut reader, &mut outbound).await
            }
            Err(reason) => reason,
        };

        self.app.disconnect_client_usecase.execute(&client).await;
        outbound.close();
        if let Err(e) = writer.close().await {
            tracing::debug!("Failed to close connection of '{}': {}", self.username, e);
        }
        self.transition(SessionState::Closed);

        match &reason {
            CloseReason::PeerClosed | CloseReason::Evicted => {
                tracing::info!("Session for '{}' ended: {}", self.username, reason)
            }
            _ => tracing::warn!("Session for '{}' ended: {}", self.username, reason),
        }
        reason
    }

    async fn relay<W, R, E>(
        &self,
        writer: &mut W,
        reader: &mut R,
        outbound: &mut OutboundReceiver,
    ) -> CloseReason
    where
        W: Sink<WsMessage> + Unpin,
        W::Error: fmt::Display,
        R: Stream<Item = Result<WsMessage, E>> + Unpin,
        E: fmt::Display,
    {
        loop {
            tokio::select! {
                frame = reader.next() => match frame {
                    None => return CloseReason::PeerClosed,
                    Some(Err(e)) => return CloseReason::ReadError(e.to_string()),
                    Some(Ok(frame)) => {
                        if let Some(reason) = self.handle_frame(frame).await {
                            return reason;
                        }
                    }
                },
                message = outbound.recv() => match message {
                    None => return CloseReason::Evicted,
                    Some(message) => {
                        if let Err(reason) = send_message(writer, &message).await {
                            return reason;
                        }
                    }
                },
            }
        }
    }

    /// Handle one inbound frame. Returns a reason when the session must close.
    async fn handle_frame(&self, frame: WsMessage) -> Option<CloseReason> {
        let decoded = match frame {
            WsMessage::Text(text) => serde_json::from_str::<InboundMessageDto>(text.as_str()),
            WsMessage::Binary(bytes) => serde_json::from_slice::<InboundMessageDto>(&bytes),
            WsMessage::Close(_) => {
                tracing::debug!("Client '{}' requested close", self.username);
                return Some(CloseReason::PeerClosed);
            }
            WsMessage::Ping(_) | WsMessage::Pong(_) => return None,
        };

        let inbound = match decoded {
            Ok(inbound) => inbound,
            Err(e) => {
                tracing::warn!("Error reading JSON from {}: {}", self.username, e);
                return Some(CloseReason::MalformedPayload(e.to_string()));
            }
        };

        if let Some(claimed) = inbound.username.as_deref()
            && claimed != self.username.as_str()
        {
            tracing::debug!(
                "Ignoring username '{}' sent by '{}'",
                claimed,
                self.username
            );
        }

        match self
            .app
            .send_message_usecase
            .execute(self.username.clone(), inbound.text.unwrap_or_default())
            .await
        {
            Ok(()) => None,
            Err(e) => {
                tracing::error!("Failed to forward message from '{}': {}", self.username, e);
                Some(CloseReason::HubUnavailable)
            }
        }
    }
}

async fn replay_history<W>(writer: &mut W, history: Vec<Message>) -> Result<usize, CloseReason>
where
    W: Sink<WsMessage> + Unpin,
    W::Error: fmt::Display,
{
    let count = history.len();
    for message in &history {
        send_message(writer, message).await?;
    }
    Ok(count)
}

async fn send_message<W>(writer: &mut W, message: &Message) -> Result<(), CloseReason>
where
    W: Sink<WsMessage> + Unpin,
    W::Error: fmt::Display,
{
    let json = serde_json::to_string(&MessageDto::from(message)).map_err(|e| {
        tracing::error!("Failed to encode message {}: {}", message.id, e);
        CloseReason::WriteError(e.to_string())
    })?;
    writer
        .send(WsMessage::Text(json.into()))
        .await
        .map_err(|e| CloseReason::WriteError(e.to_string()))
}
