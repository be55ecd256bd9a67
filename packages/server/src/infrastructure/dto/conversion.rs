//! Conversion logic between DTOs and domain entities.

use hiroba_shared::time::to_rfc3339;

use crate::{
    domain::Message,
    infrastructure::dto::{http::StatsDto, websocket::MessageDto},
    usecase::Stats,
};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&Message> for MessageDto {
    fn from(model: &Message) -> Self {
        Self {
            id: model.id.value(),
            username: model.username.as_str().to_string(),
            text: model.text.clone(),
            timestamp: to_rfc3339(&model.timestamp),
        }
    }
}

impl From<Message> for MessageDto {
    fn from(model: Message) -> Self {
        Self {
            id: model.id.value(),
            timestamp: to_rfc3339(&model.timestamp),
            username: model.username.into_string(),
            text: model.text,
        }
    }
}

impl From<Stats> for StatsDto {
    fn from(stats: Stats) -> Self {
        Self {
            total_messages: stats.total_messages,
            active_clients: stats.active_clients,
        }
    }
}
