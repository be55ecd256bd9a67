//! Outbound delivery interface.
//!
//! The hub pushes messages through this trait without knowing the transport.
//! The WebSocket session owns the other end and writes to the peer.

use super::{entity::Message, error::DeliveryError};

/// Handle that pushes messages to exactly one remote peer.
#[cfg_attr(test, mockall::automock)]
pub trait OutboundSink: Send + Sync {
    /// Push a message without waiting.
    ///
    /// Fails when the peer is gone or its buffer is full.
    fn push(&self, message: &Message) -> Result<(), DeliveryError>;

    /// Close the sink. The owning session observes this and tears down the
    /// connection. Calling it more than once is harmless.
    fn close(&self);
}
