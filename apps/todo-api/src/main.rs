//! # Todo API サーバー
//!
//! Todo の作成・一覧・完了・削除を提供する HTTP API サーバー。
//!
//! ## 起動シーケンス
//!
//! 1. `.env` の読み込み（`ENV_FILE` で明示されたファイルの読み込み失敗は致命的）
//! 2. トレーシング初期化
//! 3. 設定読み込み
//! 4. MongoDB への接続と ping（失敗時はリスナーを開く前に終了する）
//! 5. サーバー起動
//!
//! Ctrl-C / SIGTERM を受けると処理中のリクエストを待ってから停止し、
//! 最後に MongoDB クライアントを閉じる。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `MONGODB_URI` | **Yes** | MongoDB 接続文字列 |
//! | `MONGODB_DATABASE` | No | データベース名（デフォルト: `golang_db`） |
//! | `MONGODB_COLLECTION` | No | コレクション名（デフォルト: `todos`） |
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `ENV_FILE` | No | 読み込む dotenv ファイルのパス |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,todo=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! MONGODB_URI=mongodb://localhost:27017 cargo run -p todo-api
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use todo_api::{
    app::build_app,
    config::{self, TodoApiConfig},
    handler::{ReadinessState, TodoState},
};
use todo_infra::{
    db::{self, DatabaseHealthCheck, MongoHealthCheck},
    repository::{MongoTodoRepository, TodoRepository},
};
use todo_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Todo API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // トレーシング初期化より前に読み込むため、結果のログ出力は後で行う
    let env_file = config::load_env_file();

    let tracing_config = TracingConfig::from_env("todo-api");
    init_tracing(&tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = %tracing_config.service_name).entered();

    match env_file.context("環境変数ファイルの読み込みに失敗しました")? {
        Some(path) => tracing::debug!(path = %path.display(), "環境変数ファイルを読み込みました"),
        None => tracing::debug!("環境変数ファイルはありません"),
    }

    // 設定読み込み
    let config = TodoApiConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Todo API サーバーを起動します: {}",
        config.bind_address()
    );

    // MongoDB に接続
    let client = db::create_client(&config.mongodb_uri)
        .await
        .context("MongoDB クライアントの生成に失敗しました")?;
    let database = client.database(&config.database);
    db::ping(&database)
        .await
        .context("MongoDB への接続に失敗しました")?;
    tracing::info!(
        database = %config.database,
        collection = %config.collection,
        "MongoDB に接続しました"
    );

    // 依存コンポーネントを初期化
    let health_check: Arc<dyn DatabaseHealthCheck> =
        Arc::new(MongoHealthCheck::new(database.clone()));
    let readiness_state = Arc::new(ReadinessState {
        database: health_check,
    });

    let repository: Arc<dyn TodoRepository> =
        Arc::new(MongoTodoRepository::new(&database, &config.collection));
    let todo_state = Arc::new(TodoState { repository });

    let app = build_app(todo_state, readiness_state);

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("{} のバインドに失敗しました", config.bind_address()))?;
    tracing::info!(
        "Todo API サーバーが起動しました: {}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    client.shutdown().await;
    tracing::info!("Todo API サーバーを停止しました");

    Ok(())
}

/// Ctrl-C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました");
}
