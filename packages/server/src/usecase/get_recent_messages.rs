//! UseCase: 直近メッセージ取得処理

use std::sync::Arc;

use crate::domain::{Message, MessageLog};

/// 直近メッセージ取得のユースケース
pub struct GetRecentMessagesUseCase {
    log: Arc<dyn MessageLog>,
}

impl GetRecentMessagesUseCase {
    pub fn new(log: Arc<dyn MessageLog>) -> Self {
        Self { log }
    }

    /// 直近 `limit` 件を古い順で返す（`limit <= 0` の場合は 50 件）
    pub async fn execute(&self, limit: i64) -> Vec<Message> {
        self.log.recent(limit).await
    }
}
