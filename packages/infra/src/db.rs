//! # MongoDB 接続管理
//!
//! クライアントの生成と疎通確認を行う。
//!
//! ## クライアントの共有
//!
//! `mongodb::Client` は内部に接続プールを持ち、`Clone` で安価に複製できる。
//! 起動時に一度だけ生成し、`Database` / `Collection` ハンドルとして各コンポーネントに渡す。
//! 追加のロックは不要。
//!
//! ## タイムアウト
//!
//! 接続・サーバー選択のタイムアウトはドライバのデフォルト値に従う。
//! 接続文字列のオプション（`serverSelectionTimeoutMS` など）で上書きできる。

use async_trait::async_trait;
use mongodb::{Client, Database, bson::doc};

use crate::error::InfraError;

/// 接続文字列から MongoDB クライアントを生成する
///
/// この時点では接続文字列の解析と DNS 解決（`mongodb+srv://` の場合）のみ行われ、
/// サーバーへの到達性は [`ping`] で確認する。
#[tracing::instrument(skip_all)]
pub async fn create_client(uri: &str) -> Result<Client, InfraError> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client)
}

/// `ping` コマンドでサーバーへの到達性を確認する
#[tracing::instrument(skip_all, level = "debug", fields(database = %database.name()))]
pub async fn ping(database: &Database) -> Result<(), InfraError> {
    database.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}

/// データベースの稼働確認
///
/// Readiness Check から使用する。テストではスタブに差し替える。
#[async_trait]
pub trait DatabaseHealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), InfraError>;
}

/// MongoDB 実装の DatabaseHealthCheck
#[derive(Debug, Clone)]
pub struct MongoHealthCheck {
    database: Database,
}

impl MongoHealthCheck {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl DatabaseHealthCheck for MongoHealthCheck {
    async fn ping(&self) -> Result<(), InfraError> {
        ping(&self.database).await
    }
}
