//! # テスト用モック
//!
//! ハンドラテスト・結合テストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todo-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
    Arc,
    Mutex,
    MutexGuard,
    atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use todo_domain::todo::{NewTodo, Todo, TodoId};

use crate::{db::DatabaseHealthCheck, error::InfraError, repository::TodoRepository};

// ===== InMemoryTodoRepository =====

/// 挿入順を保持するインメモリの TodoRepository
///
/// ID は 8 バイトの連番を末尾に持つ 12 バイト値として採番する。
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    todos:   Arc<Mutex<Vec<Todo>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保持している Todo のスナップショットを返す
    ///
    /// ロックが poison されている場合は空として扱う。
    pub fn todos(&self) -> Vec<Todo> {
        self.lock().map(|todos| todos.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lock().map(|todos| todos.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Todo>>, InfraError> {
        self.todos
            .lock()
            .map_err(|e| InfraError::unexpected(format!("ロックの取得に失敗しました: {e}")))
    }

    fn issue_id(&self) -> TodoId {
        let sequence = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut bytes = [0u8; TodoId::BYTE_LENGTH];
        bytes[TodoId::BYTE_LENGTH - 8..].copy_from_slice(&sequence.to_be_bytes());
        TodoId::from_bytes(bytes)
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        Ok(self.lock()?.clone())
    }

    async fn insert(&self, todo: NewTodo) -> Result<Todo, InfraError> {
        let todo = todo.into_persisted(self.issue_id());
        self.lock()?.push(todo.clone());
        Ok(todo)
    }

    async fn mark_completed(&self, id: &TodoId) -> Result<(), InfraError> {
        if let Some(todo) = self.lock()?.iter_mut().find(|t| t.id() == id) {
            todo.complete();
        }
        Ok(())
    }

    async fn delete(&self, id: &TodoId) -> Result<(), InfraError> {
        self.lock()?.retain(|t| t.id() != id);
        Ok(())
    }
}

// ===== StubDatabaseHealthCheck =====

/// 固定の結果を返す DatabaseHealthCheck
#[derive(Debug, Clone, Copy)]
pub struct StubDatabaseHealthCheck {
    healthy: bool,
}

impl StubDatabaseHealthCheck {
    pub fn healthy() -> Self {
        Self { healthy: true }
    }

    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

#[async_trait]
impl DatabaseHealthCheck for StubDatabaseHealthCheck {
    async fn ping(&self) -> Result<(), InfraError> {
        if self.healthy {
            Ok(())
        } else {
            Err(InfraError::unexpected("stub: database unavailable"))
        }
    }
}
