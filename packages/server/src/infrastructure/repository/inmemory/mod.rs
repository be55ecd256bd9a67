//! InMemory implementations of the relay state stores.

pub mod client_registry;
pub mod message_log;

pub use client_registry::InMemoryClientRegistry;
pub use message_log::InMemoryMessageLog;
