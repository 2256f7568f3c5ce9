//! # エラーレスポンスボディ
//!
//! すべてのエラーレスポンスは `{ "error": "..." }` の形式で返す。

use serde::{Deserialize, Serialize};

/// 内部エラー時にクライアントへ返す固定メッセージ
const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// エラーレスポンスボディ
///
/// ## 使用例
///
/// ```
/// use todo_shared::ErrorBody;
///
/// let body = ErrorBody::new("Invalid todo id");
/// assert_eq!(body.error, "Invalid todo id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// 500 Internal Server Error 用
    ///
    /// メッセージは固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new(INTERNAL_ERROR_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_serializeでerrorフィールドのみのjsonになる() {
        let body = ErrorBody::new("Todo body cannot be empty");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "error": "Todo body cannot be empty" })
        );
    }

    #[test]
    fn test_internal_errorは固定メッセージを返す() {
        assert_eq!(ErrorBody::internal_error().error, "Internal Server Error");
    }
}
