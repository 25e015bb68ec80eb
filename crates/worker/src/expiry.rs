//! Periodic removal of expired job state.
//!
//! Reads already treat rows past `expires_at` as absent; this task
//! physically deletes them so the table does not grow without bound.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use mediaport_db::repositories::JobRepo;

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Run the expiry sweep loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Job state expiry sweeper started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Job state expiry sweeper stopping");
                break;
            }
            _ = interval.tick() => {
                match JobRepo::delete_expired(&pool).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Expiry sweep: purged expired job state");
                        } else {
                            tracing::debug!("Expiry sweep: nothing to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Expiry sweep failed");
                    }
                }
            }
        }
    }
}
