//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 登録解除とシンクのクローズ
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録中のクライアントの切断
//! - エッジケース：ハブにより既に削除されたクライアントの切断（冪等性）

use std::sync::Arc;

use crate::domain::{Client, ClientRegistry};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// ClientRegistry（ブロードキャスト対象の管理）
    registry: Arc<dyn ClientRegistry>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(registry: Arc<dyn ClientRegistry>) -> Self {
        Self { registry }
    }

    /// クライアント切断を実行
    ///
    /// ハブによる削除と競合しても安全（削除済みの場合は何もしない）。
    ///
    /// # Returns
    ///
    /// このクライアントを登録解除した場合は `true`、既に削除済みなら `false`
    pub async fn execute(&self, client: &Client) -> bool {
        client.sink.close();
        let removed = self.registry.remove(&client.id).await;

        let total_clients = self.registry.size().await;
        tracing::info!(
            "Client disconnected: {} (Total clients: {})",
            client.username,
            total_clients
        );

        removed
    }
}
