//! UseCase: メッセージ送信処理
//!
//! セッションが受信したメッセージをブロードキャストハブのキューに投入します。
//! ID・タイムスタンプの割り当てと配信はハブが行います。

use crate::domain::Username;

use super::{
    broadcast_hub::{HubHandle, InboundMessage},
    error::SendMessageError,
};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// ハブへの送信口
    hub: HubHandle,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(hub: HubHandle) -> Self {
        Self { hub }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `username` - セッションに紐付いた送信者名（クライアントが送ってきた名前ではない）
    /// * `text` - メッセージ本文（サニタイズしない）
    ///
    /// # Returns
    ///
    /// * `Ok(())` - キューへの投入に成功
    /// * `Err(SendMessageError::HubUnavailable)` - ハブが停止している
    pub async fn execute(&self, username: Username, text: String) -> Result<(), SendMessageError> {
        tracing::debug!("Enqueue message from '{}': {}", username, text);
        self.hub.submit(InboundMessage { username, text }).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        domain::MessageLog,
        infrastructure::repository::{InMemoryClientRegistry, InMemoryMessageLog},
        usecase::BroadcastHub,
    };

    #[tokio::test]
    async fn test_send_message_is_persisted_by_hub() {
        // テスト項目: 投入したメッセージがハブによってログに保存される
        // given (前提条件):
        let log = Arc::new(InMemoryMessageLog::default());
        let registry = Arc::new(InMemoryClientRegistry::new());
        let (hub, handle) = BroadcastHub::new(log.clone(), registry, 8);
        let worker = tokio::spawn(hub.run());
        let usecase = SendMessageUseCase::new(handle);

        // when (操作):
        let result = usecase
            .execute(Username::from("alice"), "hello".to_string())
            .await;
        drop(usecase);
        worker.await.unwrap();

        // then (期待する結果):
        assert!(result.is_ok());
        let messages = log.recent(10).await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].username.as_str(), "alice");
        assert_eq!(messages[0].text, "hello");
    }

    #[tokio::test]
    async fn test_send_message_fails_without_hub() {
        // テスト項目: ハブが停止している場合は HubUnavailable が返される
        // given (前提条件):
        let log = Arc::new(InMemoryMessageLog::default());
        let registry = Arc::new(InMemoryClientRegistry::new());
        let (hub, handle) = BroadcastHub::new(log, registry, 8);
        drop(hub);
        let usecase = SendMessageUseCase::new(handle);

        // when (操作):
        let result = usecase
            .execute(Username::from("alice"), "hello".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(SendMessageError::HubUnavailable));
    }
}
