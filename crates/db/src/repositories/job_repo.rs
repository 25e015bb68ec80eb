//! Repository for the `import_jobs` table: the TTL-bounded Job State
//! Store and, via the claim/defer operations, the work queue.
//!
//! Claiming uses `SELECT FOR UPDATE SKIP LOCKED` so any number of worker
//! processes can poll concurrently without double-claiming a job. Every
//! read and claim filters on `expires_at`, so an expired job is absent
//! even before the sweeper physically removes it.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::job::ImportJob;
use crate::models::status::JobStatus;

/// Fixed job-state TTL: one hour from creation, regardless of outcome.
pub const JOB_TTL_SECS: f64 = 3600.0;

/// Column list for `import_jobs` queries.
const COLUMNS: &str = "\
    job_id, status_id, source_ref, images_imported, error_message, \
    attempts, next_attempt_at, claimed_at, created_at, expires_at";

/// Provides state and queue operations for import jobs.
pub struct JobRepo;

impl JobRepo {
    /// Create a new pending job with a fresh time-ordered id.
    ///
    /// The insert is the enqueue: there is no separate work item to
    /// publish, so a job whose state cannot be written is never queued.
    pub async fn submit(pool: &PgPool, source_ref: &str) -> Result<ImportJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO import_jobs (job_id, status_id, source_ref, expires_at) \
             VALUES ($1, $2, $3, NOW() + make_interval(secs => $4)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImportJob>(&query)
            .bind(Uuid::now_v7())
            .bind(JobStatus::Pending.id())
            .bind(source_ref)
            .bind(JOB_TTL_SECS)
            .fetch_one(pool)
            .await
    }

    /// Look up a job by id. Returns `None` if it never existed or its
    /// TTL has elapsed.
    pub async fn find_active(
        pool: &PgPool,
        job_id: Uuid,
    ) -> Result<Option<ImportJob>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM import_jobs WHERE job_id = $1 AND expires_at > NOW()");
        sqlx::query_as::<_, ImportJob>(&query)
            .bind(job_id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically claim the next due job.
    ///
    /// Marks the job `running` and bumps its attempt counter before the
    /// caller does any external work, so an observer can distinguish
    /// queued from in-progress. Due means: not terminal, not currently
    /// claimed, retry delay elapsed, TTL not expired.
    pub async fn claim_next(pool: &PgPool) -> Result<Option<ImportJob>, sqlx::Error> {
        let query = format!(
            "UPDATE import_jobs \
             SET claimed_at = NOW(), status_id = $1, attempts = attempts + 1 \
             WHERE job_id = ( \
                 SELECT job_id FROM import_jobs \
                 WHERE status_id IN ($2, $3) \
                   AND claimed_at IS NULL \
                   AND next_attempt_at <= NOW() \
                   AND expires_at > NOW() \
                 ORDER BY next_attempt_at ASC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImportJob>(&query)
            .bind(JobStatus::Running.id())
            .bind(JobStatus::Pending.id())
            .bind(JobStatus::Running.id())
            .fetch_optional(pool)
            .await
    }

    /// Mark a job completed with its final imported-record count.
    pub async fn complete(
        pool: &PgPool,
        job_id: Uuid,
        images_imported: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE import_jobs SET status_id = $2, images_imported = $3 WHERE job_id = $1",
        )
        .bind(job_id)
        .bind(JobStatus::Completed.id())
        .bind(images_imported)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a job terminally failed with an error message.
    pub async fn fail(pool: &PgPool, job_id: Uuid, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE import_jobs SET status_id = $2, error_message = $3 WHERE job_id = $1",
        )
        .bind(job_id)
        .bind(JobStatus::Failed.id())
        .bind(error)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Release a claimed job for a later retry.
    ///
    /// Clears the claim and pushes `next_attempt_at` out by the given
    /// delay; the job stays `running` so a terminal state is never
    /// rolled back to an earlier stage.
    pub async fn defer_retry(
        pool: &PgPool,
        job_id: Uuid,
        delay_secs: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE import_jobs \
             SET claimed_at = NULL, \
                 next_attempt_at = NOW() + make_interval(secs => $2) \
             WHERE job_id = $1",
        )
        .bind(job_id)
        .bind(delay_secs)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Physically remove jobs whose TTL has elapsed. Returns the number
    /// of rows deleted.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM import_jobs WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
