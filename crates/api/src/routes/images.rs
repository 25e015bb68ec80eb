//! Image record listing and the dev-only seed endpoint.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use mediaport_core::types::{DbId, Timestamp};
use mediaport_db::models::image::{Image, NewImage};
use mediaport_db::repositories::ImageRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Fallback shown when a record was stored without a resolved URL.
const PLACEHOLDER_URL: &str = "https://via.placeholder.com/300x200?text=No+Image";

/// Postgres "relation does not exist".
const PG_UNDEFINED_TABLE: &str = "42P01";

/// An image record as served to clients, with read-side defaults applied.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageView {
    pub id: DbId,
    pub name: String,
    pub external_id: String,
    pub size_bytes: i64,
    pub mime_type: Option<String>,
    pub storage_url: String,
    pub source: String,
    pub status: String,
    pub created_at: Timestamp,
}

impl From<Image> for ImageView {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            name: image.name,
            external_id: image.external_id,
            size_bytes: image.size_bytes.unwrap_or(0),
            mime_type: image.mime_type,
            storage_url: image
                .storage_url
                .unwrap_or_else(|| PLACEHOLDER_URL.to_string()),
            source: image.source.unwrap_or_else(|| "unknown".to_string()),
            status: image.status,
            created_at: image.created_at,
        }
    }
}

/// GET /images -- all imported image records, newest first.
///
/// If the table does not exist yet (first boot, migrations pending) the
/// response is an empty array rather than an error, so read clients
/// stay functional while the store initializes.
async fn list_images(State(state): State<AppState>) -> AppResult<Json<Vec<ImageView>>> {
    let images = match ImageRepo::list_all(&state.pool).await {
        Ok(images) => images,
        Err(sqlx::Error::Database(db_err))
            if db_err.code().as_deref() == Some(PG_UNDEFINED_TABLE) =>
        {
            tracing::warn!("images table not initialized yet, returning empty list");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(images.into_iter().map(ImageView::from).collect()))
}

/// Seed response payload.
#[derive(Debug, Serialize)]
pub struct SeedResult {
    pub message: String,
    pub count: usize,
}

/// POST /seed-test-data -- dev-only: insert fixed sample records
/// directly, bypassing the job pipeline.
async fn seed_test_data(State(state): State<AppState>) -> AppResult<Json<SeedResult>> {
    let samples = [
        NewImage {
            name: "landscape.jpg".to_string(),
            external_id: "test_1".to_string(),
            size_bytes: Some(1_500_000),
            mime_type: Some("image/jpeg".to_string()),
            storage_url: Some(
                "https://images.unsplash.com/photo-1506744038136-46273834b3fb".to_string(),
            ),
            source: Some("test".to_string()),
        },
        NewImage {
            name: "portrait.png".to_string(),
            external_id: "test_2".to_string(),
            size_bytes: Some(800_000),
            mime_type: Some("image/png".to_string()),
            storage_url: Some(
                "https://images.unsplash.com/photo-1519681393784-d120267933ba".to_string(),
            ),
            source: Some("test".to_string()),
        },
        NewImage {
            name: "nature.jpg".to_string(),
            external_id: "test_3".to_string(),
            size_bytes: Some(1_200_000),
            mime_type: Some("image/jpeg".to_string()),
            storage_url: Some(
                "https://images.unsplash.com/photo-1441974231531-c6227db76b6e".to_string(),
            ),
            source: Some("test".to_string()),
        },
    ];

    for sample in &samples {
        ImageRepo::insert(&state.pool, sample).await?;
    }

    Ok(Json(SeedResult {
        message: format!("Added {} test images", samples.len()),
        count: samples.len(),
    }))
}

/// Mount image routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/images", get(list_images))
        .route("/seed-test-data", post(seed_test_data))
}
