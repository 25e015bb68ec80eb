pub mod health;
pub mod images;
pub mod imports;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// GET / -- liveness message.
async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Media import API is running" }))
}

/// Build the full route tree.
///
/// Routes live at the root level (no version prefix), matching the
/// service's public interface:
///
/// ```text
/// /                  liveness message
/// /health            service, database, and queue health
/// /import            submit an import job (POST)
/// /import/{job_id}   poll job state (GET)
/// /images            list imported image records (GET)
/// /seed-test-data    dev-only: insert sample records (POST)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .merge(health::router())
        .merge(imports::router())
        .merge(images::router())
}
