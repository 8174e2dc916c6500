use crate::core::handler::ApiHandler;
use crate::domain::ports::{ConfigProvider, PhoneNumberUtil};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::validate_socket_addr;
use axum::extract::{RawQuery, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::json;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
struct AppState {
    handler: ApiHandler,
}

/// 建立 API 路由；所有 API 回應都是 200，結果由 `success` 欄位表示
pub fn router(util: Arc<dyn PhoneNumberUtil>, expose_error_messages: bool) -> Router {
    let state = Arc::new(AppState {
        handler: ApiHandler::new(util, expose_error_messages),
    });

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/hello", any(hello))
        .route("/api/parse", any(parse))
        .route("/api/parse-and-keep-raw-input", any(parse_and_keep_raw_input))
        .route("/api/format", any(format))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Response {
    Json(json!({ "ok": true })).into_response()
}

async fn hello(State(state): State<Arc<AppState>>) -> Response {
    Json(state.handler.hello()).into_response()
}

async fn parse(
    State(state): State<Arc<AppState>>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Response {
    Json(state.handler.parse(&method, query.as_deref())).into_response()
}

async fn parse_and_keep_raw_input(
    State(state): State<Arc<AppState>>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Response {
    Json(
        state
            .handler
            .parse_and_keep_raw_input(&method, query.as_deref()),
    )
    .into_response()
}

async fn format(
    State(state): State<Arc<AppState>>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Response {
    Json(state.handler.format(&method, query.as_deref())).into_response()
}

pub async fn bind<C: ConfigProvider>(config: &C) -> Result<TcpListener> {
    let addr: SocketAddr = validate_socket_addr("server.bind", config.bind_addr())?;
    TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::ServerError {
            message: format!("failed to bind {}: {}", addr, e),
        })
}

/// Serves until `shutdown` resolves, then waits up to `grace` for in-flight
/// requests.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    grace: Duration,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .into_future();
    tokio::pin!(server);

    let server_error = |e: std::io::Error| AppError::ServerError {
        message: format!("server failed: {}", e),
    };

    tokio::select! {
        result = &mut server => {
            result.map_err(server_error)?;
        }
        _ = shutdown => {
            tracing::info!("🛑 Shutdown requested, draining connections");
            let _ = shutdown_tx.send(());
            match tokio::time::timeout(grace, &mut server).await {
                Ok(result) => result.map_err(server_error)?,
                Err(_) => {
                    return Err(AppError::ServerError {
                        message: format!("shutdown timed out after {:?}", grace),
                    });
                }
            }
        }
    }

    Ok(())
}

pub async fn serve<C: ConfigProvider>(config: &C, util: Arc<dyn PhoneNumberUtil>) -> Result<()> {
    let listener = bind(config).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("🚀 Listening on http://{}", local_addr);

    let app = router(util, config.expose_error_messages());
    serve_with_shutdown(listener, app, shutdown_signal(), config.shutdown_timeout()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    #[cfg(not(unix))]
    ctrl_c.await;
}
