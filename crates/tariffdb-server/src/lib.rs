//! HTTP surface for tariffdb-core.
//!
//! ## Endpoints
//!
//! - `GET /suggestions?query=<term>` — JSON array of
//!   `{hs_code, original_description, full_context}`; `500 {"error": ...}`
//!   when the store cannot answer
//! - `GET /health` — liveness probe
//!
//! Every request opens its own read-only store handle on the blocking pool
//! and drops it before the response is sent.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tariffdb_core::search::suggest;
use tariffdb_core::{Suggestion, TariffStore};
use tokio::net::TcpListener;
use tracing::{error, info};

/// Shared, immutable server state: only the store location.
#[derive(Debug, Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    /// Search term for code suggestions.
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

/// `GET /suggestions`
pub async fn suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Response {
    let started = Instant::now();
    let db_path = Arc::clone(&state.db_path);
    let query = params.query;

    let outcome = tokio::task::spawn_blocking(move || -> tariffdb_core::Result<Vec<Suggestion>> {
        let store = TariffStore::open_read_only(db_path.as_path())?;
        suggest(&store, &query)
    })
    .await;

    match outcome {
        Ok(Ok(hits)) => {
            info!(
                hits = hits.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "suggestions served"
            );
            Json(hits).into_response()
        }
        Ok(Err(e)) => {
            error!(error = %e, "suggestion query failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(e) => {
            error!(error = %e, "suggestion task panicked");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/suggestions", get(suggestions))
        .route("/health", get(health))
        .with_state(state)
}

/// Binds `addr` and serves until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, db = %state.db_path.display(), "tariffdb server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::path::Path;
    use tariffdb_core::loader::{build_database, default_data_dir};

    fn built_state(dir: &Path) -> AppState {
        let db = dir.join("tariffs.db");
        build_database(&default_data_dir().join("sample_tariff.csv"), &db, "CA").unwrap();
        AppState::new(db)
    }

    async fn call(state: AppState, query: &str) -> (StatusCode, serde_json::Value) {
        let resp = suggestions(
            State(state),
            Query(SuggestParams {
                query: query.to_owned(),
            }),
        )
        .await;
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn returns_suggestion_array() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = call(built_state(dir.path()), "horses").await;

        assert_eq!(status, StatusCode::OK);
        let hits: Vec<Suggestion> = serde_json::from_value(body).unwrap();
        assert_eq!(hits[0].hs_code, "01.01");
        assert_eq!(hits[0].full_context, "Live horses, asses, mules and hinnies.");
    }

    #[tokio::test]
    async fn store_failure_is_error_payload() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path().join("missing.db"));
        let (status, body) = call(state, "horses").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let err: ErrorBody = serde_json::from_value(body).unwrap();
        assert!(err.error.contains("not found"));
    }

    #[tokio::test]
    async fn missing_query_is_rejected() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let dir = tempfile::tempdir().unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(built_state(dir.path()));
        tokio::spawn(async move { axum::serve(listener, app).await });

        let mut conn = tokio::net::TcpStream::connect(addr).await.unwrap();
        conn.write_all(b"GET /suggestions HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = Vec::new();
        conn.read_to_end(&mut raw).await.unwrap();

        let head = String::from_utf8_lossy(&raw);
        assert!(head.starts_with("HTTP/1.1 400"), "{head}");
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }
}
