//! # ヘルスチェックハンドラ
//!
//! - `/health` — Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` — Readiness Check（MongoDB への疎通を確認）
//!
//! レスポンス型は [`todo_shared::HealthResponse`] / [`todo_shared::ReadinessResponse`] を参照。

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use todo_infra::db::DatabaseHealthCheck;
use todo_shared::{CheckStatus, HealthResponse, ReadinessResponse};

/// Readiness Check のタイムアウト
const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

/// Todo API のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub database: Arc<dyn DatabaseHealthCheck>,
}

/// Todo API の Readiness Check エンドポイント
///
/// データベースに ping を送り、成功 → 200、失敗またはタイムアウト → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let database = check_database(state.database.as_ref()).await;

    let response = ReadinessResponse::from_checks(HashMap::from([(
        "database".to_string(),
        database,
    )]));
    let http_status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(response))
}

async fn check_database(database: &dyn DatabaseHealthCheck) -> CheckStatus {
    match tokio::time::timeout(READINESS_TIMEOUT, database.ping()).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: database ping failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: database check timed out");
            CheckStatus::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use pretty_assertions::assert_eq;
    use todo_infra::mock::StubDatabaseHealthCheck;
    use todo_shared::ReadinessStatus;
    use tower::ServiceExt;

    use super::*;

    fn create_test_app(database: StubDatabaseHealthCheck) -> Router {
        let state = Arc::new(ReadinessState {
            database: Arc::new(database),
        });

        Router::new()
            .route("/health", get(health_check))
            .merge(
                Router::new()
                    .route("/health/ready", get(readiness_check))
                    .with_state(state),
            )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        sut: Router,
        uri: &str,
    ) -> (StatusCode, T) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = sut.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_checkはhealthyとバージョンを返す() {
        let sut = create_test_app(StubDatabaseHealthCheck::healthy());

        let (status, body): (_, HealthResponse) = get_json(sut, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, HealthResponse::healthy(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn test_readiness_check_dbが応答すれば200() {
        let sut = create_test_app(StubDatabaseHealthCheck::healthy());

        let (status, body): (_, ReadinessResponse) = get_json(sut, "/health/ready").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, ReadinessStatus::Ready);
        assert_eq!(body.checks.get("database"), Some(&CheckStatus::Ok));
    }

    #[tokio::test]
    async fn test_readiness_check_dbが応答しなければ503() {
        let sut = create_test_app(StubDatabaseHealthCheck::unhealthy());

        let (status, body): (_, ReadinessResponse) = get_json(sut, "/health/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, ReadinessStatus::NotReady);
        assert_eq!(body.checks.get("database"), Some(&CheckStatus::Error));
    }
}
