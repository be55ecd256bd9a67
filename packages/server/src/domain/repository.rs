//! Repository trait 定義
//!
//! リレーのコアが必要とする状態ストアのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{Client, Message},
    value_object::{ClientId, Username},
};

/// Default number of messages returned by [`MessageLog::recent`] when the
/// requested limit is zero or negative.
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// Resolve a caller-supplied limit, applying [`DEFAULT_RECENT_LIMIT`] to `limit <= 0`.
pub fn effective_limit(limit: i64) -> usize {
    if limit <= 0 {
        DEFAULT_RECENT_LIMIT
    } else {
        usize::try_from(limit).unwrap_or(usize::MAX)
    }
}

/// Append-only message log.
///
/// ## 並行性
///
/// - `append` は他の `append` および読み取りと排他的に実行される
/// - `recent` / `count` は互いに並行して実行できる
#[async_trait]
pub trait MessageLog: Send + Sync {
    /// 次の連番 ID と現在時刻を割り当ててメッセージを保存し、そのコピーを返す
    async fn append(&self, username: Username, text: String) -> Message;

    /// 直近 `limit` 件を追加順（古い順）で返す。`limit <= 0` の場合は 50 件
    async fn recent(&self, limit: i64) -> Vec<Message>;

    /// 保存されているメッセージ数
    async fn count(&self) -> usize;
}

/// Registry of clients currently eligible for broadcast.
///
/// ## 冪等性
///
/// セッション（読み取り失敗時）とハブ（送信失敗時）の双方が同じクライアントを
/// 削除しうるため、`remove` は存在しないクライアントに対しては何もしない。
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// クライアントを登録
    async fn add(&self, client: Client);

    /// クライアントを登録解除。削除した場合は `true`
    async fn remove(&self, client_id: &ClientId) -> bool;

    /// 呼び出し時点の全クライアントのスナップショット
    async fn snapshot(&self) -> Vec<Client>;

    /// 登録中のクライアント数
    async fn size(&self) -> usize;
}
