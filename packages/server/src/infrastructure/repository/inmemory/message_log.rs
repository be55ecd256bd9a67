//! InMemory MessageLog 実装
//!
//! ドメイン層が定義する MessageLog trait の具体的な実装。
//! `VecDeque` をインメモリストアとして使用し、`RwLock` で保護します。
//!
//! ## 保持ポリシー
//!
//! デフォルトでは古いメッセージを削除しません（プロセスの生存期間中は増え続ける）。
//! `with_retention` で上限を指定した場合、上限を超えた分は古い順に削除されます。
//! どちらの場合も ID は 1 から連番で増え続けます。

use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use hiroba_shared::time::{Clock, SystemClock};
use tokio::sync::RwLock;

use crate::domain::{
    Message, MessageId, MessageLog, Username, repository::effective_limit,
};

/// 書き込みロック下でのみ変更される内部状態
struct LogState {
    messages: VecDeque<Message>,
    next_id: MessageId,
}

/// インメモリ MessageLog 実装
pub struct InMemoryMessageLog {
    state: RwLock<LogState>,
    /// タイムスタンプの割り当てに使う時計
    clock: Arc<dyn Clock>,
    /// 保持する最大件数（`None` の場合は無制限）
    retention: Option<usize>,
}

impl InMemoryMessageLog {
    /// 無制限に保持する MessageLog を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(LogState {
                messages: VecDeque::new(),
                next_id: MessageId::FIRST,
            }),
            clock,
            retention: None,
        }
    }

    /// 最大 `max_messages` 件を保持する MessageLog を作成
    ///
    /// `max_messages` が 0 の場合は 1 として扱う
    pub fn with_retention(clock: Arc<dyn Clock>, max_messages: usize) -> Self {
        Self {
            retention: Some(max_messages.max(1)),
            ..Self::new(clock)
        }
    }

    pub fn retention(&self) -> Option<usize> {
        self.retention
    }
}

impl Default for InMemoryMessageLog {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[async_trait]
impl MessageLog for InMemoryMessageLog {
    async fn append(&self, username: Username, text: String) -> Message {
        let mut state = self.state.write().await;

        let message = Message {
            id: state.next_id,
            username,
            text,
            timestamp: self.clock.now(),
        };
        state.messages.push_back(message.clone());
        state.next_id = state.next_id.next();

        if let Some(max) = self.retention {
            while state.messages.len() > max {
                state.messages.pop_front();
            }
        }

        tracing::debug!(
            "Message {} saved: {}: {}",
            message.id,
            message.username,
            message.text
        );
        message
    }

    async fn recent(&self, limit: i64) -> Vec<Message> {
        let limit = effective_limit(limit);
        let state = self.state.read().await;

        let start = state.messages.len().saturating_sub(limit);
        state.messages.range(start..).cloned().collect()
    }

    async fn count(&self) -> usize {
        self.state.read().await.messages.len()
    }
}
