//! Domain entities.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};

use super::{
    message_pusher::OutboundSink,
    value_object::{ClientId, MessageId, Username},
};

/// A relayed chat message.
///
/// Created only by the message log, which assigns the id and timestamp.
/// Immutable once created; readers receive clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub username: Username,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A connected client eligible to receive broadcasts.
#[derive(Clone)]
pub struct Client {
    pub id: ClientId,
    pub username: Username,
    pub sink: Arc<dyn OutboundSink>,
}

impl Client {
    pub fn new(username: Username, sink: Arc<dyn OutboundSink>) -> Self {
        Self {
            id: ClientId::generate(),
            username,
            sink,
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
