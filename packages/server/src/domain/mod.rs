//! Domain layer: entities, value objects and the interfaces the relay core depends on.

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{Client, Message};
pub use error::DeliveryError;
pub use message_pusher::OutboundSink;
pub use repository::{ClientRegistry, MessageLog};
pub use value_object::{ClientId, MessageId, Username};
