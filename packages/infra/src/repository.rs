//! # リポジトリ実装
//!
//! - **テスタビリティ**: トレイト経由でインメモリ実装に差し替え可能
//! - **ドライバの隔離**: BSON ドキュメントとの変換はこのモジュール内で完結する

pub mod todo_repository;

pub use todo_repository::{MongoTodoRepository, TodoRepository};
