//! # Todo サービス共有ユーティリティ
//!
//! 各クレートから使用される共通のレスポンス型と Observability 基盤を提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` への変換は API クレートの責務）
//! - トレーシング関連の依存は `observability` feature でのみ有効化する

pub mod error_body;
pub mod health;
pub mod observability;
pub mod success_response;

pub use error_body::ErrorBody;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
pub use success_response::SuccessResponse;
