//! Domain error types.

use thiserror::Error;

/// Errors raised when pushing a message to one client's outbound sink.
///
/// Either variant makes the client ineligible for further broadcasts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The client's outbound buffer is full (slow consumer).
    #[error("outbound buffer is full")]
    BufferFull,

    /// The peer is gone or the sink was already closed.
    #[error("peer disconnected")]
    Disconnected,
}
