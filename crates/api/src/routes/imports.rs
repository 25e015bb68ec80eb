//! Import submission and job-state polling.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mediaport_core::error::CoreError;
use mediaport_core::types::Timestamp;
use mediaport_db::models::job::ImportJob;
use mediaport_db::models::status::JobStatus;
use mediaport_db::repositories::JobRepo;

use crate::dispatch;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /import`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub source_ref: String,
}

/// Response for `POST /import`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportAccepted {
    pub job_id: Uuid,
    pub source_ref: String,
    pub message: &'static str,
}

/// Observable job state for `GET /import/{job_id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStateView {
    pub job_id: Uuid,
    pub status: &'static str,
    pub source_ref: String,
    pub images_imported: i32,
    pub created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ImportJob> for JobStateView {
    fn from(job: ImportJob) -> Self {
        let status = JobStatus::from_id(job.status_id)
            .map(JobStatus::as_str)
            .unwrap_or("unknown");
        Self {
            job_id: job.job_id,
            status,
            source_ref: job.source_ref,
            images_imported: job.images_imported,
            created_at: job.created_at,
            error: job.error_message,
        }
    }
}

/// POST /import -- submit a new import job.
///
/// Returns 202 immediately; the import runs in the background. Callers
/// poll `GET /import/{job_id}` for progress.
async fn submit_import(
    State(state): State<AppState>,
    Json(body): Json<ImportRequest>,
) -> AppResult<(StatusCode, Json<ImportAccepted>)> {
    let job = dispatch::submit_import(&state.pool, &body.source_ref).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ImportAccepted {
            job_id: job.job_id,
            source_ref: job.source_ref,
            message: "Import started",
        }),
    ))
}

/// GET /import/{job_id} -- current job state.
///
/// Returns 404 once the job's TTL has elapsed or if it never existed;
/// the two cases are indistinguishable to the caller.
async fn get_import_state(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> AppResult<Json<JobStateView>> {
    let job = JobRepo::find_active(&state.pool, job_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "ImportJob",
                id: job_id.to_string(),
            })
        })?;

    Ok(Json(JobStateView::from(job)))
}

/// Mount import routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/import", post(submit_import))
        .route("/import/{job_id}", get(get_import_state))
}
