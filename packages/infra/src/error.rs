//! # インフラ層エラー定義
//!
//! MongoDB との通信やドキュメント変換で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターン:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別
//!
//! `From` 実装や convenience constructor でエラーを生成した時点のスパン階層が
//! `SpanTrace` として記録される（`tracing_error::ErrorLayer` が登録されている場合）。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
///
/// API 層ではいずれも 500 Internal Server Error として扱う。
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// MongoDB ドライバのエラー
    ///
    /// 接続失敗、コマンド実行エラー、カーソルからのデコード失敗など。
    #[error("データベースエラー: {0}")]
    Database(#[source] mongodb::error::Error),

    /// 格納されたドキュメントがエンティティの不変条件を満たさない
    ///
    /// `_id` が欠落している、本文が空、など。
    #[error("不正なドキュメント: {0}")]
    InvalidDocument(String),

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 不正なドキュメントエラーを生成する
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::InvalidDocument(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<mongodb::error::Error> for InfraError {
    fn from(source: mongodb::error::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Database(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// テスト用に ErrorLayer 付き subscriber を設定する
    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    fn io_driver_error() -> mongodb::error::Error {
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "接続拒否").into()
    }

    #[test]
    fn test_from_mongodb_errorでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_find_all");
            let _enter = span.enter();

            let err: InfraError = io_driver_error().into();

            assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
            let trace = format!("{}", err.span_trace());
            assert!(
                trace.contains("test_find_all"),
                "SpanTrace がスパン名を含むこと: {trace}"
            );
        });
    }

    #[test]
    fn test_databaseエラーはsourceを返す() {
        let err: InfraError = io_driver_error().into();

        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_documentのdisplayにメッセージが含まれる() {
        let err = InfraError::invalid_document("_id がありません");

        assert!(matches!(err.kind(), InfraErrorKind::InvalidDocument(_)));
        assert_eq!(err.to_string(), "不正なドキュメント: _id がありません");
    }

    #[test]
    fn test_unexpectedでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_mark_completed");
            let _enter = span.enter();

            let err = InfraError::unexpected("lock poisoned");

            assert!(matches!(err.kind(), InfraErrorKind::Unexpected(_)));
            assert!(format!("{}", err.span_trace()).contains("test_mark_completed"));
        });
    }
}
