//! UseCase 層のエラー型

use thiserror::Error;

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// ブロードキャストハブが停止している
    #[error("broadcast hub is not running")]
    HubUnavailable,
}
