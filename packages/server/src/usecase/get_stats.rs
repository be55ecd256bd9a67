//! UseCase: 統計情報取得処理

use std::sync::Arc;

use crate::domain::{ClientRegistry, MessageLog};

/// Point-in-time relay statistics.
///
/// The two counts are read independently and are not mutually consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total_messages: usize,
    pub active_clients: usize,
}

/// 統計情報取得のユースケース
pub struct GetStatsUseCase {
    log: Arc<dyn MessageLog>,
    registry: Arc<dyn ClientRegistry>,
}

impl GetStatsUseCase {
    pub fn new(log: Arc<dyn MessageLog>, registry: Arc<dyn ClientRegistry>) -> Self {
        Self { log, registry }
    }

    pub async fn execute(&self) -> Stats {
        Stats {
            total_messages: self.log.count().await,
            active_clients: self.registry.size().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Client, Username, message_pusher::MockOutboundSink},
        infrastructure::repository::{InMemoryClientRegistry, InMemoryMessageLog},
    };

    #[tokio::test]
    async fn test_stats_after_appends_and_connections() {
        // テスト項目: 3 件の追加と 2 クライアントの接続後、{3, 2} が返される
        // given (前提条件):
        let log = Arc::new(InMemoryMessageLog::default());
        let registry = Arc::new(InMemoryClientRegistry::new());
        for text in ["one", "two", "three"] {
            log.append(Username::from("alice"), text.to_string()).await;
        }
        for name in ["alice", "bob"] {
            registry
                .add(Client::new(
                    Username::from(name),
                    Arc::new(MockOutboundSink::new()),
                ))
                .await;
        }
        let usecase = GetStatsUseCase::new(log, registry);

        // when (操作):
        let stats = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(
            stats,
            Stats {
                total_messages: 3,
                active_clients: 2
            }
        );
    }

    #[tokio::test]
    async fn test_stats_on_fresh_relay() {
        // テスト項目: 起動直後は {0, 0} が返される
        // given (前提条件):
        let usecase = GetStatsUseCase::new(
            Arc::new(InMemoryMessageLog::default()),
            Arc::new(InMemoryClientRegistry::new()),
        );

        // when (操作):
        let stats = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(stats.total_messages, 0);
        assert_eq!(stats.active_clients, 0);
    }
}
