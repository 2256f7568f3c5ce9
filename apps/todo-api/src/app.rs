//! # ルーター構築
//!
//! State の注入とミドルウェアの適用を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//!
//! ## ミドルウェアの順序
//!
//! ```text
//! リクエスト → SetRequestId → Trace → PropagateRequestId → ハンドラ
//! ```
//!
//! `x-request-id` ヘッダーがなければ UUID v7 を採番し、スパンとレスポンスの両方に載せる。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch},
};
use todo_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{
    ReadinessState,
    TodoState,
    complete_todo,
    create_todo,
    delete_todo,
    health_check,
    list_todos,
    readiness_check,
};

/// アプリケーションのルーターを構築する
pub fn build_app(todo_state: Arc<TodoState>, readiness_state: Arc<ReadinessState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", patch(complete_todo).delete(delete_todo))
        .with_state(todo_state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
