//! # Todo ドメイン層
//!
//! Todo サービスのドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//!   ↘             ↑
//!     ─────────────
//! ```
//!
//! ドメイン層はインフラ層（MongoDB ドライバ）に一切依存しない。
//! 識別子も `bson::oid::ObjectId` ではなく独自の [`todo::TodoId`] で表現し、
//! ドライバ固有型との変換はインフラ層が担う。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`todo`] - Todo エンティティと値オブジェクト
//!
//! ## 使用例
//!
//! ```rust
//! use todo_domain::todo::{NewTodo, TodoBody, TodoId};
//!
//! let body = TodoBody::new("buy milk").unwrap();
//! let new_todo = NewTodo::new(body, false);
//!
//! let id = TodoId::parse("65f1c0ffee00000000000001").unwrap();
//! let todo = new_todo.into_persisted(id);
//! assert!(!todo.completed());
//! ```

pub mod error;
pub mod todo;

pub use error::DomainError;
