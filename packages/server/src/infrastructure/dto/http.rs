//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response body of `GET /stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsDto {
    pub total_messages: usize,
    pub active_clients: usize,
}

/// Response body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}
