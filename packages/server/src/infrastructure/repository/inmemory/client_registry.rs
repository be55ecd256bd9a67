//! InMemory ClientRegistry 実装
//!
//! 接続中のクライアントを `ClientId` をキーとする `HashMap` で管理します。
//! セッションとハブの双方から変更されるため、全ての操作は `Mutex` 下で行います。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Client, ClientId, ClientRegistry};

/// インメモリ ClientRegistry 実装
#[derive(Default)]
pub struct InMemoryClientRegistry {
    /// Key: ClientId, Value: Client
    clients: Mutex<HashMap<ClientId, Client>>,
}

impl InMemoryClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRegistry for InMemoryClientRegistry {
    async fn add(&self, client: Client) {
        let mut clients = self.clients.lock().await;
        tracing::debug!(
            "Client '{}' ({}) registered (total clients: {})",
            client.username,
            client.id,
            clients.len() + 1
        );
        clients.insert(client.id, client);
    }

    async fn remove(&self, client_id: &ClientId) -> bool {
        let mut clients = self.clients.lock().await;
        match clients.remove(client_id) {
            Some(client) => {
                tracing::debug!(
                    "Client '{}' ({}) unregistered (total clients: {})",
                    client.username,
                    client.id,
                    clients.len()
                );
                true
            }
            None => false,
        }
    }

    async fn snapshot(&self) -> Vec<Client> {
        let clients = self.clients.lock().await;
        clients.values().cloned().collect()
    }

    async fn size(&self) -> usize {
        self.clients.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Username, message_pusher::MockOutboundSink};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - add / remove / snapshot / size の基本操作
    // - remove の冪等性（二重削除が安全であること）
    // - 同名クライアントが別エントリとして扱われること
    // - 並行した add / remove で状態が壊れないこと
    // ========================================

    fn create_test_client(name: &str) -> Client {
        Client::new(Username::from(name), Arc::new(MockOutboundSink::new()))
    }

    #[tokio::test]
    async fn test_added_client_appears_once_in_snapshot() {
        // テスト項目: 登録したクライアントがスナップショットにちょうど 1 回現れる
        // given (前提条件):
        let registry = InMemoryClientRegistry::new();
        let alice = create_test_client("alice");

        // when (操作):
        registry.add(alice.clone()).await;
        let snapshot = registry.snapshot().await;

        // then (期待する結果):
        assert_eq!(snapshot.iter().filter(|c| c.id == alice.id).count(), 1);
        assert_eq!(registry.size().await, 1);
    }

    #[tokio::test]
    async fn test_removed_client_disappears_from_snapshot() {
        // テスト項目: 削除したクライアントはスナップショットに現れない
        // given (前提条件):
        let registry = InMemoryClientRegistry::new();
        let alice = create_test_client("alice");
        let bob = create_test_client("bob");
        registry.add(alice.clone()).await;
        registry.add(bob.clone()).await;

        // when (操作):
        let removed = registry.remove(&alice.id).await;

        // then (期待する結果):
        assert!(removed);
        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, bob.id);
    }

    #[tokio::test]
    async fn test_double_remove_is_noop() {
        // テスト項目: 二重削除は安全で、2 回目は何もしない（冪等性）
        // given (前提条件):
        let registry = InMemoryClientRegistry::new();
        let alice = create_test_client("alice");
        registry.add(alice.clone()).await;

        // when (操作):
        let first = registry.remove(&alice.id).await;
        let second = registry.remove(&alice.id).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(registry.size().await, 0);
    }

    #[tokio::test]
    async fn test_same_username_is_tracked_separately() {
        // テスト項目: 同じ表示名の 2 クライアントは別々に登録される
        // given (前提条件):
        let registry = InMemoryClientRegistry::new();
        let first = create_test_client("alice");
        let second = create_test_client("alice");

        // when (操作):
        registry.add(first.clone()).await;
        registry.add(second.clone()).await;

        // then (期待する結果):
        assert_eq!(registry.size().await, 2);
        registry.remove(&first.id).await;
        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, second.id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_remove_of_same_client() {
        // テスト項目: 同じクライアントを並行して削除しても 1 回だけ削除される
        // given (前提条件):
        let registry = Arc::new(InMemoryClientRegistry::new());
        let alice = create_test_client("alice");
        registry.add(alice.clone()).await;

        // when (操作):
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                let id = alice.id;
                tokio::spawn(async move { registry.remove(&id).await })
            })
            .collect();
        let mut removed_count = 0;
        for handle in handles {
            if handle.await.unwrap() {
                removed_count += 1;
            }
        }

        // then (期待する結果):
        assert_eq!(removed_count, 1);
        assert_eq!(registry.size().await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_snapshot_during_concurrent_add_and_remove() {
        // テスト項目: 並行した add / snapshot / remove の後もレジストリが一貫している
        // given (前提条件):
        let registry = Arc::new(InMemoryClientRegistry::new());
        let resident = create_test_client("resident");
        registry.add(resident.clone()).await;

        // when (操作):
        let handles: Vec<_> = (0..4)
            .map(|task| {
                let registry = registry.clone();
                let resident_id = resident.id;
                tokio::spawn(async move {
                    for i in 0..200 {
                        let client = create_test_client(&format!("user-{}-{}", task, i));
                        registry.add(client.clone()).await;

                        let snapshot = registry.snapshot().await;
                        assert_eq!(snapshot.iter().filter(|c| c.id == client.id).count(), 1);
                        assert_eq!(snapshot.iter().filter(|c| c.id == resident_id).count(), 1);

                        assert!(registry.remove(&client.id).await);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, resident.id);
        assert_eq!(registry.size().await, 1);
    }
}
