//! # Todo エンティティ
//!
//! サービスが扱う唯一のエンティティ。
//!
//! ## ライフサイクル
//!
//! ```text
//! NewTodo ──insert（ID 採番はストレージ側）──▶ Todo ──complete──▶ Todo(completed = true)
//!                                               │
//!                                               └──delete──▶ （消滅）
//! ```
//!
//! - `body` は作成後に変更されない
//! - `completed` は `true` にしか遷移しない（`false` に戻す操作は存在しない）
//!
//! ## 識別子
//!
//! [`TodoId`] は 12 バイトの値で、外部表現は 24 桁の 16 進文字列。
//! ストレージ（MongoDB）の `ObjectId` と同じ形式だが、ドメイン層はドライバに依存しない。

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::DomainError;

/// 不正な ID が指定されたときのメッセージ
pub const INVALID_TODO_ID_MESSAGE: &str = "Invalid todo id";

/// 本文が空のときのメッセージ
pub const EMPTY_TODO_BODY_MESSAGE: &str = "Todo body cannot be empty";

/// Todo の一意識別子
///
/// ストレージ層が採番する 12 バイトの値。
/// API では 24 桁の 16 進文字列として受け渡す。
///
/// # 例
///
/// ```rust
/// use todo_domain::todo::TodoId;
///
/// let id = TodoId::parse("65F1C0FFEE00000000000001").unwrap();
/// assert_eq!(id.to_string(), "65f1c0ffee00000000000001");
///
/// assert!(TodoId::parse("not-a-valid-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId([u8; TodoId::BYTE_LENGTH]);

impl TodoId {
    /// バイト長
    pub const BYTE_LENGTH: usize = 12;

    /// 16 進文字列から ID を復元する
    ///
    /// ちょうど 24 桁の 16 進数字（大文字・小文字どちらも可）のみ受け付ける。
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let mut bytes = [0u8; Self::BYTE_LENGTH];
        hex::decode_to_slice(value, &mut bytes)
            .map_err(|_| DomainError::Validation(INVALID_TODO_ID_MESSAGE.to_string()))?;
        Ok(Self(bytes))
    }

    /// 生のバイト列から ID を作成する
    pub fn from_bytes(bytes: [u8; Self::BYTE_LENGTH]) -> Self {
        Self(bytes)
    }

    /// 生のバイト列を取得する
    pub fn bytes(&self) -> [u8; Self::BYTE_LENGTH] {
        self.0
    }
}

impl fmt::Display for TodoId {
    /// 小文字の 24 桁 16 進文字列で出力する
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for TodoId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TodoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(|e| de::Error::custom(e.message()))
    }
}

/// Todo の本文
///
/// 空文字列を拒否する。前後の空白は除去しないため、空白のみの本文は受け付ける。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoBody(String);

impl TodoBody {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation(EMPTY_TODO_BODY_MESSAGE.to_string()));
        }
        Ok(Self(value))
    }

    /// データベースに格納された値をそのまま復元する
    ///
    /// 作成時のバリデーションを経ずに書き込まれた空の本文も受け入れる。
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TodoBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 永続化前の Todo
///
/// ID はまだ持たない。リポジトリに挿入すると採番された ID 付きの [`Todo`] になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    body:      TodoBody,
    completed: bool,
}

impl NewTodo {
    pub fn new(body: TodoBody, completed: bool) -> Self {
        Self { body, completed }
    }

    pub fn body(&self) -> &TodoBody {
        &self.body
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// ストレージが採番した ID を付与して永続化済みの Todo にする
    pub fn into_persisted(self, id: TodoId) -> Todo {
        Todo {
            id,
            completed: self.completed,
            body: self.body,
        }
    }
}

/// 永続化済みの Todo
///
/// 常に有効な ID を持つ。本文は API 経由で作成されたものなら空でない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id:        TodoId,
    completed: bool,
    body:      TodoBody,
}

impl Todo {
    /// データベースから読み込んだ値で復元する
    pub fn from_db(id: TodoId, completed: bool, body: TodoBody) -> Self {
        Self {
            id,
            completed,
            body,
        }
    }

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn body(&self) -> &TodoBody {
        &self.body
    }

    /// 完了にする
    ///
    /// 既に完了していても何もしない（冪等）。
    pub fn complete(&mut self) {
        self.completed = true;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    const VALID_HEX: &str = "65f1c0ffee00000000000001";

    // ===== TodoId =====

    #[test]
    fn test_parse_24桁の16進文字列を受け付ける() {
        let id = TodoId::parse(VALID_HEX).unwrap();

        assert_eq!(
            id.bytes(),
            [0x65, 0xf1, 0xc0, 0xff, 0xee, 0, 0, 0, 0, 0, 0, 0x01]
        );
    }

    #[test]
    fn test_parse_大文字も受け付け表示は小文字になる() {
        let id = TodoId::parse("65F1C0FFEE00000000000001").unwrap();

        assert_eq!(id.to_string(), VALID_HEX);
    }

    #[rstest]
    #[case::空文字列("")]
    #[case::任意の文字列("not-a-valid-id")]
    #[case::短い("65f1c0ffee")]
    #[case::長い("65f1c0ffee0000000000000100")]
    #[case::奇数桁("65f1c0ffee0000000000001")]
    #[case::非16進文字を含む("65f1c0ffee0000000000000g")]
    #[case::前後に空白("65f1c0ffee00000000000001 ")]
    fn test_parse_不正な文字列はバリデーションエラーになる(#[case] input: &str) {
        let result = TodoId::parse(input);

        assert_eq!(
            result,
            Err(DomainError::Validation(INVALID_TODO_ID_MESSAGE.to_string()))
        );
    }

    #[test]
    fn test_from_strはparseと同じ結果になる() {
        let id: TodoId = VALID_HEX.parse().unwrap();

        assert_eq!(id, TodoId::parse(VALID_HEX).unwrap());
    }

    #[test]
    fn test_todo_idはjson文字列としてシリアライズされる() {
        let id = TodoId::parse(VALID_HEX).unwrap();

        let json = serde_json::to_value(id).unwrap();

        assert_eq!(json, serde_json::json!(VALID_HEX));
    }

    #[test]
    fn test_不正なjson文字列のデシリアライズは失敗する() {
        let result: Result<TodoId, _> = serde_json::from_str(r#""xyz""#);

        let error = result.unwrap_err();
        assert!(error.to_string().contains(INVALID_TODO_ID_MESSAGE));
    }

    // ===== TodoBody =====

    #[test]
    fn test_空の本文はバリデーションエラーになる() {
        let result = TodoBody::new("");

        assert_eq!(
            result,
            Err(DomainError::Validation(EMPTY_TODO_BODY_MESSAGE.to_string()))
        );
    }

    #[test]
    fn test_空白のみの本文は受け付ける() {
        let body = TodoBody::new("   ").unwrap();

        assert_eq!(body.as_str(), "   ");
    }

    #[test]
    fn test_from_dbは空の本文も復元する() {
        let body = TodoBody::from_db(String::new());

        assert_eq!(body.as_str(), "");
    }

    // ===== NewTodo / Todo =====

    #[test]
    fn test_into_persistedでidが付与され他の値は保持される() {
        let body = TodoBody::new("buy milk").unwrap();
        let id = TodoId::parse(VALID_HEX).unwrap();

        let todo = NewTodo::new(body.clone(), true).into_persisted(id);

        assert_eq!(todo.id(), &id);
        assert!(todo.completed());
        assert_eq!(todo.body(), &body);
    }

    #[test]
    fn test_completeは冪等である() {
        let id = TodoId::parse(VALID_HEX).unwrap();
        let mut todo = Todo::from_db(id, false, TodoBody::new("buy milk").unwrap());

        todo.complete();
        let after_first = todo.clone();
        todo.complete();

        assert!(todo.completed());
        assert_eq!(todo, after_first);
    }
}
