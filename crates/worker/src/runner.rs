//! The worker's claim loop.
//!
//! Polls the queue on a fixed interval and drains every due job before
//! sleeping again. Claiming uses `FOR UPDATE SKIP LOCKED` (in the
//! repository), so multiple worker processes can run this loop
//! concurrently without double-processing a job. Jobs within one runner
//! execute strictly sequentially.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::executor::ImportExecutor;
use mediaport_db::repositories::JobRepo;

/// Default polling interval for the claim loop.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Long-lived task that claims and executes import jobs.
pub struct ImportRunner {
    pool: PgPool,
    executor: Arc<ImportExecutor>,
    poll_interval: Duration,
}

impl ImportRunner {
    /// Create a runner with the default 1-second poll interval.
    pub fn new(pool: PgPool, executor: Arc<ImportExecutor>) -> Self {
        Self {
            pool,
            executor,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Run the claim loop until the cancellation token is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        tracing::info!(
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Import runner started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Import runner shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    self.drain_due_jobs().await;
                }
            }
        }
    }

    /// Claim and execute jobs until the queue has nothing due.
    async fn drain_due_jobs(&self) {
        loop {
            match JobRepo::claim_next(&self.pool).await {
                Ok(Some(job)) => {
                    tracing::info!(
                        job_id = %job.job_id,
                        source_ref = %job.source_ref,
                        attempt = job.attempts,
                        "Claimed import job",
                    );
                    self.executor.execute(&job).await;
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to claim next job");
                    break;
                }
            }
        }
    }
}
