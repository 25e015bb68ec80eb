//! Single-attempt execution of an import job.
//!
//! The claim (performed by the runner) has already marked the job
//! `running` and bumped its attempt counter, so by the time `execute`
//! runs, an observer polling the job sees it in progress. One attempt
//! is: fetch candidates from the import source, persist each one
//! best-effort, then write the terminal or retry outcome.
//!
//! Retry is modelled at the queue level: a failed attempt with attempts
//! remaining releases the claim with a visibility delay rather than
//! sleeping or recursing, so a worker crash between attempts loses
//! nothing and any worker process may pick up the retry.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio::time::Instant;

use mediaport_core::source::{ImportSource, ImportSourceError, SOURCE_EXTERNAL_DRIVE};
use mediaport_db::models::image::NewImage;
use mediaport_db::models::job::ImportJob;
use mediaport_db::repositories::{ImageRepo, JobRepo};

/// Hard wall-clock ceiling for one attempt. A timed-out attempt counts
/// as a failure and goes through the normal retry policy.
pub const HARD_TIME_LIMIT: Duration = Duration::from_secs(30 * 60);

/// Soft threshold: attempts that finish but took longer than this are
/// logged as a warning.
pub const SOFT_TIME_LIMIT: Duration = Duration::from_secs(25 * 60);

/// Bounded-retry policy for import attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first (not "retries after").
    pub max_attempts: i16,
    /// Fixed delay before a failed job becomes claimable again.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(60),
        }
    }
}

/// Executes claimed import jobs against a pluggable import source.
pub struct ImportExecutor {
    pool: PgPool,
    source: Arc<dyn ImportSource>,
    policy: RetryPolicy,
}

impl ImportExecutor {
    /// Create an executor with the default retry policy (3 attempts,
    /// 60-second delay).
    pub fn new(pool: PgPool, source: Arc<dyn ImportSource>) -> Self {
        Self::with_policy(pool, source, RetryPolicy::default())
    }

    /// Create an executor with an explicit retry policy.
    pub fn with_policy(pool: PgPool, source: Arc<dyn ImportSource>, policy: RetryPolicy) -> Self {
        Self {
            pool,
            source,
            policy,
        }
    }

    /// Run one attempt of a claimed job and record its outcome.
    ///
    /// State-write failures here cannot be reported anywhere better
    /// than the log; the claim stays set and the job ages out via TTL.
    pub async fn execute(&self, job: &ImportJob) {
        let started = Instant::now();

        let outcome = tokio::time::timeout(HARD_TIME_LIMIT, self.run_attempt(job)).await;

        // Report the soft threshold regardless of how the attempt ended.
        if started.elapsed() >= SOFT_TIME_LIMIT {
            tracing::warn!(
                job_id = %job.job_id,
                elapsed_secs = started.elapsed().as_secs(),
                "Import attempt exceeded the soft time limit",
            );
        }

        match outcome {
            Ok(Ok(inserted)) => {
                if let Err(e) = JobRepo::complete(&self.pool, job.job_id, inserted).await {
                    tracing::error!(job_id = %job.job_id, error = %e, "Failed to mark job completed");
                    return;
                }

                tracing::info!(
                    job_id = %job.job_id,
                    source_ref = %job.source_ref,
                    images_imported = inserted,
                    attempt = job.attempts,
                    "Import job completed",
                );
            }
            Ok(Err(e)) => {
                self.record_attempt_failure(job, &e.to_string()).await;
            }
            Err(_) => {
                let message = format!(
                    "attempt exceeded the {}-minute time limit",
                    HARD_TIME_LIMIT.as_secs() / 60
                );
                self.record_attempt_failure(job, &message).await;
            }
        }
    }

    /// Fetch candidates and persist them best-effort.
    ///
    /// Per-item insert failures are logged and skipped: partial success
    /// is a valid outcome, and the batch never aborts midway. Returns
    /// the number of records actually inserted.
    async fn run_attempt(&self, job: &ImportJob) -> Result<i32, ImportSourceError> {
        let items = self.source.fetch_items(&job.source_ref).await?;

        tracing::debug!(
            job_id = %job.job_id,
            candidates = items.len(),
            "Fetched candidate items from import source",
        );

        let mut inserted: i32 = 0;
        for item in &items {
            let input = NewImage {
                name: item.name.clone(),
                external_id: item.external_id.clone(),
                size_bytes: item.size_bytes,
                mime_type: item.mime_type.clone(),
                storage_url: Some(item.storage_url.clone()),
                source: Some(SOURCE_EXTERNAL_DRIVE.to_string()),
            };

            match ImageRepo::insert(&self.pool, &input).await {
                Ok(_) => inserted += 1,
                Err(e) => {
                    tracing::warn!(
                        job_id = %job.job_id,
                        name = %item.name,
                        error = %e,
                        "Skipping candidate that failed to insert",
                    );
                }
            }
        }

        Ok(inserted)
    }

    /// Record a failed attempt: terminal `failed` once the policy is
    /// exhausted, otherwise release the claim with the retry delay.
    async fn record_attempt_failure(&self, job: &ImportJob, message: &str) {
        if job.attempts >= self.policy.max_attempts {
            tracing::error!(
                job_id = %job.job_id,
                source_ref = %job.source_ref,
                attempts = job.attempts,
                error = %message,
                "Import job failed after exhausting retries",
            );
            if let Err(e) = JobRepo::fail(&self.pool, job.job_id, message).await {
                tracing::error!(job_id = %job.job_id, error = %e, "Failed to mark job failed");
            }
        } else {
            tracing::warn!(
                job_id = %job.job_id,
                attempt = job.attempts,
                max_attempts = self.policy.max_attempts,
                retry_delay_secs = self.policy.retry_delay.as_secs(),
                error = %message,
                "Import attempt failed, scheduling retry",
            );
            if let Err(e) =
                JobRepo::defer_retry(&self.pool, job.job_id, self.policy.retry_delay.as_secs_f64())
                    .await
            {
                tracing::error!(job_id = %job.job_id, error = %e, "Failed to schedule retry");
            }
        }
    }
}
