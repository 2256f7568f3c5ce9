//! # Todo インフラ層
//!
//! MongoDB との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: MongoDB クライアントの生成と疎通確認
//! - **リポジトリ実装**: Todo の永続化（BSON ドキュメントとの相互変換を含む）
//! - **テスト用実装**: インメモリリポジトリ（`test-utils` feature）
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドライバ固有の型（`ObjectId`, `Document`）はこのクレートの外に出さない。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todo_infra::{db, repository::{MongoTodoRepository, TodoRepository}};
//!
//! async fn setup() -> Result<(), todo_infra::InfraError> {
//!     let client = db::create_client("mongodb://localhost:27017").await?;
//!     let database = client.database("golang_db");
//!     db::ping(&database).await?;
//!
//!     let repository = MongoTodoRepository::new(&database, "todos");
//!     let todos = repository.find_all().await?;
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod repository;

#[cfg(feature = "test-utils")]
pub mod mock;

pub use error::{InfraError, InfraErrorKind};
