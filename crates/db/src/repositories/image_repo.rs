//! Repository for the `images` table (the Record Store).
//!
//! Records are append-only: there is no update path. Uniqueness of
//! `(external_id, source)` is intentionally not enforced here; see the
//! migration comment.

use sqlx::PgPool;

use crate::models::image::{Image, NewImage};

/// Column list for `images` queries.
const COLUMNS: &str = "\
    id, name, external_id, size_bytes, mime_type, storage_url, \
    source, status, created_at";

/// Provides append and list operations for imported image records.
pub struct ImageRepo;

impl ImageRepo {
    /// Append a new image record, returning the stored row.
    pub async fn insert(pool: &PgPool, input: &NewImage) -> Result<Image, sqlx::Error> {
        let query = format!(
            "INSERT INTO images (name, external_id, size_bytes, mime_type, storage_url, source) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(&input.name)
            .bind(&input.external_id)
            .bind(input.size_bytes)
            .bind(&input.mime_type)
            .bind(&input.storage_url)
            .bind(&input.source)
            .fetch_one(pool)
            .await
    }

    /// List all image records, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images ORDER BY id DESC");
        sqlx::query_as::<_, Image>(&query).fetch_all(pool).await
    }
}
