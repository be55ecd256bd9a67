//! Broadcast hub: the single serialization point of the relay.
//!
//! Every session enqueues `{username, text}` through a [`HubHandle`]. One worker
//! consumes the queue one message at a time: it appends the message to the log,
//! snapshots the registry and pushes the canonical message to every client.
//! Because only this worker appends and fans out, delivery order equals append
//! order for every client.
//!
//! Pushes never wait. A client whose push fails (peer gone, buffer full) is
//! closed and evicted without affecting delivery to anyone else.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{ClientId, ClientRegistry, Message, MessageLog, Username};

use super::error::SendMessageError;

/// A message submitted by a session, before it gets an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub username: Username,
    pub text: String,
}

/// Cloneable sender side of the hub's inbound queue.
#[derive(Clone)]
pub struct HubHandle {
    tx: mpsc::Sender<InboundMessage>,
}

impl HubHandle {
    /// Enqueue a message, waiting while the queue is full.
    pub async fn submit(&self, inbound: InboundMessage) -> Result<(), SendMessageError> {
        self.tx
            .send(inbound)
            .await
            .map_err(|_| SendMessageError::HubUnavailable)
    }
}

/// Outcome of relaying one message.
#[derive(Debug, Clone)]
pub struct FanOutReport {
    pub message: Message,
    pub delivered: usize,
    pub evicted: Vec<ClientId>,
}

/// The broadcast worker.
pub struct BroadcastHub {
    log: Arc<dyn MessageLog>,
    registry: Arc<dyn ClientRegistry>,
    inbound: mpsc::Receiver<InboundMessage>,
}

impl BroadcastHub {
    /// Create a hub whose inbound queue holds at most `inbound_capacity` messages.
    pub fn new(
        log: Arc<dyn MessageLog>,
        registry: Arc<dyn ClientRegistry>,
        inbound_capacity: usize,
    ) -> (Self, HubHandle) {
        let (tx, inbound) = mpsc::channel(inbound_capacity.max(1));
        (
            Self {
                log,
                registry,
                inbound,
            },
            HubHandle { tx },
        )
    }

    /// Consume the inbound queue until every [`HubHandle`] is dropped.
    pub async fn run(mut self) {
        tracing::info!("Broadcast hub started");
        while let Some(inbound) = self.inbound.recv().await {
            self.process(inbound).await;
        }
        tracing::info!("Broadcast hub stopped: all senders dropped");
    }

    /// Persist one message and fan it out to every registered client.
    pub async fn process(&self, inbound: InboundMessage) -> FanOutReport {
        let message = self.log.append(inbound.username, inbound.text).await;
        let clients = self.registry.snapshot().await;

        let mut delivered = 0;
        let mut evicted = Vec::new();
        for client in clients {
            match client.sink.push(&message) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        "Failed to deliver message {} to '{}' ({}): {}",
                        message.id,
                        client.username,
                        client.id,
                        e
                    );
                    client.sink.close();
                    if self.registry.remove(&client.id).await {
                        tracing::info!(
                            "Client '{}' ({}) removed due to delivery error",
                            client.username,
                            client.id
                        );
                    }
                    evicted.push(client.id);
                }
            }
        }

        tracing::debug!(
            "Broadcasted message {} from '{}' to {} client(s), evicted {}",
            message.id,
            message.username,
            delivered,
            evicted.len()
        );

        FanOutReport {
            message,
            delivered,
            evicted,
        }
    }
}
