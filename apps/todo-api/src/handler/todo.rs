//! # Todo ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /api/todos` - 全件取得
//! - `POST /api/todos` - 作成
//! - `PATCH /api/todos/{id}` - 完了にする
//! - `DELETE /api/todos/{id}` - 削除
//!
//! 存在しない ID への完了・削除は成功として扱う。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use todo_domain::todo::{NewTodo, Todo, TodoBody, TodoId};
use todo_infra::repository::TodoRepository;
use todo_shared::SuccessResponse;

use crate::error::ApiError;

/// Todo API の共有状態
pub struct TodoState {
    pub repository: Arc<dyn TodoRepository>,
}

// --- リクエスト/レスポンス型 ---

/// 作成リクエスト
///
/// `body` の欠落・`null` は空文字列として扱い、バリデーションで拒否する。
/// ボディ全体が `null` の場合もすべて欠落したものとみなす。
/// `id` などの未知のフィールドは無視する。
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub body:      Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Todo レスポンス DTO
///
/// フィールド順は `id, completed, body`。`id` が未採番（`None`）のときは出力しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id:        Option<String>,
    pub completed: bool,
    pub body:      String,
}

impl From<&Todo> for TodoDto {
    fn from(todo: &Todo) -> Self {
        Self {
            id:        Some(todo.id().to_string()),
            completed: todo.completed(),
            body:      todo.body().as_str().to_string(),
        }
    }
}

// --- ハンドラ ---

/// GET /api/todos
///
/// ストレージの返す順序のまま全件を返す。0 件のときは `[]`。
#[tracing::instrument(skip_all)]
pub async fn list_todos(
    State(state): State<Arc<TodoState>>,
) -> Result<Json<Vec<TodoDto>>, ApiError> {
    let todos = state.repository.find_all().await?;
    tracing::debug!(count = todos.len(), "todo 一覧を取得しました");

    Ok(Json(todos.iter().map(TodoDto::from).collect()))
}

/// POST /api/todos
///
/// 採番された ID を含む Todo を 201 で返す。
#[tracing::instrument(skip_all)]
pub async fn create_todo(
    State(state): State<Arc<TodoState>>,
    payload: Result<Json<Option<CreateTodoRequest>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let request = request.unwrap_or_default();

    let body = TodoBody::new(request.body.unwrap_or_default())?;
    let new_todo = NewTodo::new(body, request.completed.unwrap_or(false));

    let todo = state.repository.insert(new_todo).await?;
    tracing::info!(id = %todo.id(), "todo を作成しました");

    Ok((StatusCode::CREATED, Json(TodoDto::from(&todo))))
}

/// PATCH /api/todos/{id}
///
/// `completed` を常に `true` にする。
#[tracing::instrument(skip_all, fields(%id))]
pub async fn complete_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = TodoId::parse(&id)?;

    state.repository.mark_completed(&id).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/todos/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = TodoId::parse(&id)?;

    state.repository.delete(&id).await?;

    Ok(Json(SuccessResponse::ok()))
}
