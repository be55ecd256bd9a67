//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - クライアントの登録と履歴の取得
//!
//! ### なぜこのテストが必要か
//! - 新規クライアントが「履歴 → ライブ配信」の順に受信する前提になる
//! - 登録が履歴取得より先に行われることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：履歴がある状態での接続
//! - エッジケース：履歴が replay 上限より多い場合

use std::sync::Arc;

use crate::domain::{Client, ClientRegistry, Message, MessageLog};

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// MessageLog（履歴の取得元）
    log: Arc<dyn MessageLog>,
    /// ClientRegistry（ブロードキャスト対象の管理）
    registry: Arc<dyn ClientRegistry>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(log: Arc<dyn MessageLog>, registry: Arc<dyn ClientRegistry>) -> Self {
        Self { log, registry }
    }

    /// クライアント接続を実行
    ///
    /// クライアントを登録してから直近の履歴を取得する。登録と履歴取得は
    /// アトミックではないため、この間に配信されたメッセージは履歴とライブ配信の
    /// 両方で届く可能性がある。
    ///
    /// # Arguments
    ///
    /// * `client` - 登録するクライアント
    /// * `history_limit` - 再送する履歴の最大件数
    ///
    /// # Returns
    ///
    /// 追加順（古い順）の履歴
    pub async fn execute(&self, client: Client, history_limit: i64) -> Vec<Message> {
        let username = client.username.clone();
        self.registry.add(client).await;

        let total_clients = self.registry.size().await;
        tracing::info!(
            "Client connected: {} (Total clients: {})",
            username,
            total_clients
        );

        self.log.recent(history_limit).await
    }
}
