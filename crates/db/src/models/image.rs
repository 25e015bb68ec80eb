//! Imported image record models.

use serde::Serialize;
use sqlx::FromRow;

use mediaport_core::types::{DbId, Timestamp};

/// A row from the `images` table. Immutable once written.
///
/// Nullable columns mirror what external sources actually report; the
/// API layer applies read-side defaults (size 0, placeholder URL,
/// "unknown" source) when serving the record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub name: String,
    pub external_id: String,
    pub size_bytes: Option<i64>,
    pub mime_type: Option<String>,
    pub storage_url: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
}

/// Insert DTO for a new image record.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub name: String,
    pub external_id: String,
    pub size_bytes: Option<i64>,
    pub mime_type: Option<String>,
    pub storage_url: Option<String>,
    pub source: Option<String>,
}
