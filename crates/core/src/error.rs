/// Domain-level error taxonomy.
///
/// `Validation` maps to 4xx responses and is never retried.
/// `StoreUnavailable` maps to 503 on the synchronous path; on the worker
/// path it counts as an attempt failure subject to the retry policy.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
