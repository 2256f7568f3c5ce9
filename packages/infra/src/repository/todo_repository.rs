//! # TodoRepository
//!
//! Todo の永続化を担当するリポジトリ。
//!
//! ## ドキュメント形式
//!
//! ```json
//! { "_id": ObjectId("65f1c0ffee00000000000001"), "completed": false, "body": "buy milk" }
//! ```
//!
//! - `_id` は挿入時に省略し、MongoDB に採番させる
//! - 読み込み時に欠落しているフィールドはゼロ値（`false` / 空文字列）とみなし、そのまま返す
//!
//! ## 存在しない ID への操作
//!
//! 更新・削除は対象が存在しなくても成功として扱う（マッチ件数は debug ログにのみ出力）。

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection,
    Database,
    bson::{doc, oid::ObjectId},
};
use serde::{Deserialize, Serialize};
use todo_domain::todo::{NewTodo, Todo, TodoBody, TodoId};

use crate::error::InfraError;

/// Todo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// 全件を取得する（フィルタ・上限なし、順序はストレージに従う）
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

    /// 挿入し、採番された ID を付与した Todo を返す
    async fn insert(&self, todo: NewTodo) -> Result<Todo, InfraError>;

    /// `completed` を `true` にする（対象がなければ何もしない）
    async fn mark_completed(&self, id: &TodoId) -> Result<(), InfraError>;

    /// 削除する（対象がなければ何もしない）
    async fn delete(&self, id: &TodoId) -> Result<(), InfraError>;
}

/// コレクションに格納されるドキュメント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TodoDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub(crate) id:        Option<ObjectId>,
    #[serde(default)]
    pub(crate) completed: bool,
    #[serde(default)]
    pub(crate) body:      String,
}

impl From<&NewTodo> for TodoDocument {
    fn from(todo: &NewTodo) -> Self {
        Self {
            id:        None,
            completed: todo.completed(),
            body:      todo.body().as_str().to_string(),
        }
    }
}

impl TryFrom<TodoDocument> for Todo {
    type Error = InfraError;

    fn try_from(document: TodoDocument) -> Result<Self, Self::Error> {
        let id = document
            .id
            .ok_or_else(|| InfraError::invalid_document("_id がありません"))?;
        Ok(Todo::from_db(
            to_todo_id(id),
            document.completed,
            TodoBody::from_db(document.body),
        ))
    }
}

fn to_object_id(id: &TodoId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}

fn to_todo_id(id: ObjectId) -> TodoId {
    TodoId::from_bytes(id.bytes())
}

/// MongoDB 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct MongoTodoRepository {
    collection: Collection<TodoDocument>,
}

impl MongoTodoRepository {
    pub fn new(database: &Database, collection_name: &str) -> Self {
        Self {
            collection: database.collection(collection_name),
        }
    }
}

#[async_trait]
impl TodoRepository for MongoTodoRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<TodoDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Todo::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, todo: NewTodo) -> Result<Todo, InfraError> {
        let document = TodoDocument::from(&todo);
        let result = self.collection.insert_one(&document).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            InfraError::invalid_document(format!(
                "採番された _id が ObjectId ではありません: {}",
                result.inserted_id
            ))
        })?;

        Ok(todo.into_persisted(to_todo_id(id)))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn mark_completed(&self, id: &TodoId) -> Result<(), InfraError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": to_object_id(id) },
                doc! { "$set": { "completed": true } },
            )
            .await?;

        tracing::debug!(
            matched = result.matched_count,
            modified = result.modified_count,
            "completed を更新しました"
        );
        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &TodoId) -> Result<(), InfraError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": to_object_id(id) })
            .await?;

        tracing::debug!(deleted = result.deleted_count, "todo を削除しました");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::InfraErrorKind;

    const HEX: &str = "65f1c0ffee00000000000001";

    fn object_id() -> ObjectId {
        ObjectId::parse_str(HEX).unwrap()
    }

    #[test]
    fn test_新規ドキュメントは_idを含まずにシリアライズされる() {
        let new_todo = NewTodo::new(TodoBody::new("buy milk").unwrap(), false);

        let document = bson::to_document(&TodoDocument::from(&new_todo)).unwrap();

        assert_eq!(document, doc! { "completed": false, "body": "buy milk" });
    }

    #[test]
    fn test_ドキュメントからtodoに変換できる() {
        let document = TodoDocument {
            id:        Some(object_id()),
            completed: true,
            body:      "buy milk".to_string(),
        };

        let todo = Todo::try_from(document).unwrap();

        assert_eq!(todo.id().to_string(), HEX);
        assert!(todo.completed());
        assert_eq!(todo.body().as_str(), "buy milk");
    }

    #[test]
    fn test_欠落フィールドはゼロ値としてデコードされる() {
        let raw = doc! { "_id": object_id(), "body": "buy milk" };

        let document: TodoDocument = bson::from_document(raw).unwrap();

        assert!(!document.completed);
    }

    #[test]
    fn test_idのないドキュメントは不正なドキュメントになる() {
        let document = TodoDocument {
            id:        None,
            completed: false,
            body:      "buy milk".to_string(),
        };

        let err = Todo::try_from(document).unwrap_err();

        assert!(matches!(err.kind(), InfraErrorKind::InvalidDocument(_)));
    }

    #[test]
    fn test_本文が欠落したドキュメントは空の本文のまま返される() {
        let raw = doc! { "_id": object_id(), "completed": false };
        let document: TodoDocument = bson::from_document(raw).unwrap();

        let todo = Todo::try_from(document).unwrap();

        assert_eq!(todo.id().to_string(), HEX);
        assert_eq!(todo.body().as_str(), "");
    }

    #[test]
    fn test_本文が空のドキュメントもそのまま返される() {
        let document = TodoDocument {
            id:        Some(object_id()),
            completed: true,
            body:      String::new(),
        };

        let todo = Todo::try_from(document).unwrap();

        assert!(todo.completed());
        assert_eq!(todo.body().as_str(), "");
    }

    #[test]
    fn test_todo_idとobject_idは同じ16進表現を持つ() {
        let todo_id = TodoId::parse(HEX).unwrap();

        assert_eq!(to_object_id(&todo_id).to_hex(), HEX);
        assert_eq!(to_todo_id(object_id()), todo_id);
    }
}
