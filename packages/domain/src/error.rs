//! # ドメイン層エラー定義
//!
//! ビジネスルール違反を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//!
//! Todo サービスのドメインには「存在しない」「競合」といった状態がない。
//! 存在しない ID への更新・削除は成功扱いとなるため、`NotFound` は定義しない。

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、`{"error": "..."}` 形式の 400 レスポンスに変換する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 保持するメッセージはそのままクライアントに返される。
    ///
    /// # 例
    ///
    /// - Todo 本文が空
    /// - ID が 24 桁の 16 進文字列ではない
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}

impl DomainError {
    /// クライアント向けのメッセージを取得する
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(msg) => msg,
        }
    }
}
