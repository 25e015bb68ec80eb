//! Import job models.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use mediaport_core::types::Timestamp;

use super::status::StatusId;

/// A row from the `import_jobs` table.
///
/// One row carries both the observable job state (status, counters,
/// error) and the queue bookkeeping (attempts, next_attempt_at,
/// claimed_at). The dispatcher creates the row; after that only the
/// worker mutates it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImportJob {
    pub job_id: Uuid,
    pub status_id: StatusId,
    pub source_ref: String,
    pub images_imported: i32,
    pub error_message: Option<String>,
    /// Number of claims so far. Incremented atomically on claim, so the
    /// value a worker sees is its own attempt number (1-based).
    pub attempts: i16,
    pub next_attempt_at: Timestamp,
    pub claimed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}
