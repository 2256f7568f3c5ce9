//! # Todo API エラー定義
//!
//! ハンドラで発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | バリアント | ステータス | ボディ |
//! |------------|-----------|--------|
//! | `Validation` | 400 | `{"error": <メッセージ>}` |
//! | `MalformedBody` | 500 | `{"error": <パーサーのメッセージ>}` |
//! | `Storage` | 500 | `{"error": "Internal Server Error"}` |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_domain::DomainError;
use todo_infra::InfraError;
use todo_shared::ErrorBody;

/// Todo API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 入力値が不正（空の本文、不正な ID）
    #[error("{0}")]
    Validation(String),

    /// リクエストボディを JSON として解釈できない
    ///
    /// Content-Type の不一致や型の不一致を含む。
    #[error("リクエストボディが不正です: {0}")]
    MalformedBody(String),

    /// ストレージ操作の失敗
    #[error("ストレージエラー: {0}")]
    Storage(#[from] InfraError),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Validation(e.message().to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(message) => {
                tracing::warn!(%message, "バリデーションエラー");
                (StatusCode::BAD_REQUEST, ErrorBody::new(message))
            }
            ApiError::MalformedBody(message) => {
                tracing::warn!(%message, "リクエストボディのパースに失敗しました");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(message))
            }
            ApiError::Storage(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "ストレージエラー"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal_error())
            }
        };

        (status, Json(body)).into_response()
    }
}
