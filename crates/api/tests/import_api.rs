//! Integration tests for import submission and job-state polling.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use mediaport_db::models::status::JobStatus;
use mediaport_db::repositories::JobRepo;

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_import_returns_202_with_job_id(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/import",
        json!({ "sourceRef": "https://drive.example/folder/abc" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = body_json(response).await;
    assert_eq!(body["sourceRef"], "https://drive.example/folder/abc");
    assert_eq!(body["message"], "Import started");

    // The returned id must point at a pending job in the state store.
    let job_id: Uuid = body["jobId"].as_str().unwrap().parse().unwrap();
    let job = JobRepo::find_active(&pool, job_id).await.unwrap().unwrap();
    assert_eq!(job.status_id, JobStatus::Pending.id());
    assert_eq!(job.images_imported, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_import_with_empty_source_ref_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/import", json!({ "sourceRef": "" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_import_with_whitespace_source_ref_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/import", json!({ "sourceRef": "   " })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// Pins the documented idempotence gap: identical requests are not
// deduplicated and each produces an independent job.
#[sqlx::test(migrations = "../db/migrations")]
async fn identical_requests_produce_independent_jobs(pool: PgPool) {
    let first = post_json(
        common::build_test_app(pool.clone()),
        "/import",
        json!({ "sourceRef": "folder-a" }),
    )
    .await;
    let second = post_json(
        common::build_test_app(pool.clone()),
        "/import",
        json!({ "sourceRef": "folder-a" }),
    )
    .await;

    let first_id = body_json(first).await["jobId"].as_str().unwrap().to_string();
    let second_id = body_json(second).await["jobId"].as_str().unwrap().to_string();
    assert_ne!(first_id, second_id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn poll_returns_current_job_state(pool: PgPool) {
    let job = JobRepo::submit(&pool, "folder-a").await.unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/import/{}", job.job_id)).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["sourceRef"], "folder-a");
    assert_eq!(body["imagesImported"], 0);
    assert!(body.get("error").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn poll_includes_error_for_failed_job(pool: PgPool) {
    let job = JobRepo::submit(&pool, "folder-a").await.unwrap();
    JobRepo::claim_next(&pool).await.unwrap().unwrap();
    JobRepo::fail(&pool, job.job_id, "source unreachable").await.unwrap();

    let app = common::build_test_app(pool);
    let body = body_json(get(app, &format!("/import/{}", job.job_id)).await).await;

    assert_eq!(body["status"], "failed");
    assert_eq!(body["error"], "source unreachable");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn poll_returns_404_for_unknown_job(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/import/{}", Uuid::now_v7())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn poll_returns_404_after_ttl_expiry(pool: PgPool) {
    let job = JobRepo::submit(&pool, "folder-a").await.unwrap();
    sqlx::query("UPDATE import_jobs SET expires_at = NOW() - INTERVAL '1 second' WHERE job_id = $1")
        .bind(job.job_id)
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/import/{}", job.job_id)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
