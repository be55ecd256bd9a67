//! Value objects used by the relay core.

use std::fmt;

use uuid::Uuid;

/// Display name used when a client does not supply one.
pub const ANONYMOUS: &str = "Anonymous";

/// Sequential message identifier assigned by the message log.
///
/// Identifiers start at 1 and grow by exactly one per append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

impl MessageId {
    /// The identifier given to the first message ever appended.
    pub const FIRST: MessageId = MessageId(1);

    #[cfg(test)]
    pub(crate) fn new(value: u64) -> Self {
        assert!(value >= 1, "message id must be at least 1");
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The identifier that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name bound to a connection.
///
/// The name is self-asserted by the client and never authenticated. It is
/// never empty: an absent or empty name becomes [`ANONYMOUS`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Build a username from an optional, client-supplied value.
    pub fn from_optional(value: Option<String>) -> Self {
        match value {
            Some(name) if !name.is_empty() => Self(name),
            _ => Self::anonymous(),
        }
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self::from_optional(Some(value))
    }
}

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self::from_optional(Some(value.to_string()))
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-connection identifier.
///
/// Display names are not unique, so registry membership is keyed by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "message id must be at least 1")]
    fn test_message_id_rejects_zero() {
        // テスト項目: 0 はメッセージ ID として不正
        // given (前提条件):
        let value = 0;

        // when (操作) / then (期待する結果):
        MessageId::new(value);
    }

    #[test]
    fn test_message_id_next_increments_by_one() {
        // テスト項目: next() は 1 だけ増加した ID を返す
        // given (前提条件):
        let id = MessageId::FIRST;

        // when (操作):
        let next = id.next();

        // then (期待する結果):
        assert_eq!(next.value(), 2);
        assert!(next > id);
    }

    #[test]
    fn test_username_falls_back_to_anonymous() {
        // テスト項目: ユーザー名が未指定または空の場合は "Anonymous" になる
        // given (前提条件):
        let missing = None;
        let empty = Some(String::new());

        // when (操作):
        let from_missing = Username::from_optional(missing);
        let from_empty = Username::from_optional(empty);

        // then (期待する結果):
        assert_eq!(from_missing.as_str(), "Anonymous");
        assert_eq!(from_empty.as_str(), "Anonymous");
    }

    #[test]
    fn test_username_keeps_given_name_verbatim() {
        // テスト項目: 指定されたユーザー名はそのまま保持される（サニタイズしない）
        // given (前提条件):
        let name = "  <b>alice</b> ".to_string();

        // when (操作):
        let username = Username::from(name.clone());

        // then (期待する結果):
        assert_eq!(username.into_string(), name);
    }

    #[test]
    fn test_client_ids_are_unique() {
        // テスト項目: 生成されるクライアント ID は毎回異なる
        // given (前提条件):

        // when (操作):
        let a = ClientId::generate();
        let b = ClientId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
    }
}
