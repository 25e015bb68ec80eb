use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// `connected` if the database answers a trivial query.
    pub database: &'static str,
    /// `connected` if the job queue table is present and reachable.
    pub queue: &'static str,
}

/// GET /health -- returns service, database, and job queue health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = mediaport_db::health_check(&state.pool).await.is_ok();

    // The queue is the import_jobs table: probing it (rather than the
    // connection) catches the table-missing case during first boot.
    let queue_healthy = sqlx::query("SELECT 1 FROM import_jobs LIMIT 1")
        .fetch_optional(&state.pool)
        .await
        .is_ok();

    let status = if db_healthy && queue_healthy {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        database: if db_healthy { "connected" } else { "disconnected" },
        queue: if queue_healthy { "connected" } else { "disconnected" },
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
