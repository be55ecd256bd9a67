//! Relay configuration.

/// Number of history messages replayed to a newly connected client.
pub const DEFAULT_HISTORY_REPLAY_LIMIT: i64 = 100;

/// Number of messages returned by `GET /messages` when no valid `limit` is given.
pub const DEFAULT_HTTP_MESSAGES_LIMIT: i64 = 100;

/// Capacity of the broadcast hub's inbound queue.
pub const DEFAULT_INBOUND_CAPACITY: usize = 1024;

/// Capacity of each client's outbound queue.
pub const DEFAULT_OUTBOUND_CAPACITY: usize = 256;

/// Tunables of the relay core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// History replayed on connect
    pub history_replay_limit: i64,
    /// Maximum number of messages retained in memory (`None` = unbounded)
    pub max_messages: Option<usize>,
    /// Inbound queue capacity of the broadcast hub
    pub inbound_capacity: usize,
    /// Per-client outbound queue capacity; a client that falls this far behind is evicted
    pub outbound_capacity: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            history_replay_limit: DEFAULT_HISTORY_REPLAY_LIMIT,
            max_messages: None,
            inbound_capacity: DEFAULT_INBOUND_CAPACITY,
            outbound_capacity: DEFAULT_OUTBOUND_CAPACITY,
        }
    }
}
