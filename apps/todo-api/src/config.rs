//! # Todo API 設定
//!
//! 環境変数から Todo API サーバーの設定を読み込む。
//!
//! | 変数名 | 必須 | デフォルト |
//! |--------|------|------------|
//! | `MONGODB_URI` | **Yes** | - |
//! | `MONGODB_DATABASE` | No | `golang_db` |
//! | `MONGODB_COLLECTION` | No | `todos` |
//! | `HOST` | No | `0.0.0.0` |
//! | `PORT` | No | `5000` |
//!
//! 起動時に一度だけ読み込み、以降は変更しない。

use std::{env, path::PathBuf};

use thiserror::Error;

const DEFAULT_DATABASE: &str = "golang_db";
const DEFAULT_COLLECTION: &str = "todos";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// ポート番号として解釈できない
    #[error("PORT は有効なポート番号である必要があります: {0}")]
    InvalidPort(String),

    /// `ENV_FILE` で指定されたファイルを読み込めない
    #[error("環境変数ファイルの読み込みに失敗しました: {path}")]
    EnvFile {
        path:   PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// `.env` ファイルを読み込む
///
/// `ENV_FILE` が設定されていればそのファイルを読み込み、失敗はエラーとする。
/// 未設定の場合はカレントディレクトリから `.env` を探し、見つからなくてもエラーにしない。
/// 既に設定済みの環境変数は上書きしない。
pub fn load_env_file() -> Result<Option<PathBuf>, ConfigError> {
    match env::var_os("ENV_FILE") {
        Some(path) => {
            let path = PathBuf::from(path);
            dotenvy::from_path(&path).map_err(|source| ConfigError::EnvFile {
                path: path.clone(),
                source,
            })?;
            Ok(Some(path))
        }
        None => Ok(dotenvy::dotenv().ok()),
    }
}

/// Todo API サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoApiConfig {
    /// バインドアドレス
    pub host:        String,
    /// ポート番号
    pub port:        u16,
    /// MongoDB 接続文字列
    pub mongodb_uri: String,
    /// データベース名
    pub database:    String,
    /// コレクション名
    pub collection:  String,
}

impl TodoApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を組み立てる
    ///
    /// 空文字列は未設定とみなす。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let mongodb_uri = get("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?;
        let port = match get("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            mongodb_uri,
            database: get("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            collection: get("MONGODB_COLLECTION")
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
        })
    }

    /// `host:port` 形式のバインドアドレス
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
