//! Job dispatcher: accepts an import request and enqueues it for the
//! background worker.
//!
//! Submission is non-blocking: the import itself never runs on the
//! calling path. With the DB-backed queue the pending-state write and
//! the enqueue are one atomic insert, so a job whose state cannot be
//! tracked is never queued (fail closed).

use sqlx::PgPool;

use mediaport_core::error::CoreError;
use mediaport_db::models::job::ImportJob;
use mediaport_db::repositories::JobRepo;

/// Submit a new import job for the given source reference.
///
/// The reference must be non-empty; anything further is the provider's
/// concern. Concurrent identical requests are NOT deduplicated: each
/// call produces an independent job.
pub async fn submit_import(pool: &PgPool, source_ref: &str) -> Result<ImportJob, CoreError> {
    if source_ref.trim().is_empty() {
        return Err(CoreError::Validation(
            "sourceRef must not be empty".to_string(),
        ));
    }

    let job = JobRepo::submit(pool, source_ref)
        .await
        .map_err(|e| CoreError::StoreUnavailable(e.to_string()))?;

    tracing::info!(
        job_id = %job.job_id,
        source_ref = %job.source_ref,
        "Import job submitted",
    );

    Ok(job)
}
