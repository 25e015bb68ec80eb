//! Integration tests for image listing and the seed endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;
use sqlx::PgPool;

use mediaport_db::models::image::NewImage;
use mediaport_db::repositories::ImageRepo;

#[sqlx::test(migrations = "../db/migrations")]
async fn images_on_empty_store_returns_empty_array(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/images").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

// First-boot resilience: a missing images table must read as an empty
// store, not an error.
#[sqlx::test(migrations = "../db/migrations")]
async fn images_on_uninitialized_store_returns_empty_array(pool: PgPool) {
    sqlx::query("DROP TABLE images")
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, "/images").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn images_applies_read_side_defaults(pool: PgPool) {
    // A record stored with every optional field missing.
    ImageRepo::insert(
        &pool,
        &NewImage {
            name: "bare.png".to_string(),
            external_id: "drive_bare_1".to_string(),
            size_bytes: None,
            mime_type: None,
            storage_url: None,
            source: None,
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let body = body_json(get(app, "/images").await).await;

    let record = &body[0];
    assert_eq!(record["sizeBytes"], 0);
    assert_eq!(record["source"], "unknown");
    assert_eq!(
        record["storageUrl"],
        "https://via.placeholder.com/300x200?text=No+Image"
    );
    assert_eq!(record["status"], "imported");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn images_are_listed_newest_first(pool: PgPool) {
    for name in ["one.jpg", "two.jpg", "three.jpg"] {
        ImageRepo::insert(
            &pool,
            &NewImage {
                name: name.to_string(),
                external_id: format!("drive_{name}"),
                size_bytes: Some(100),
                mime_type: Some("image/jpeg".to_string()),
                storage_url: Some("https://cdn.example/x".to_string()),
                source: Some("test".to_string()),
            },
        )
        .await
        .unwrap();
    }

    let app = common::build_test_app(pool);
    let body = body_json(get(app, "/images").await).await;

    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[0]["name"], "three.jpg");
    assert_eq!(body[2]["name"], "one.jpg");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn seed_inserts_sample_records(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/seed-test-data",
        json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["count"], 3);

    let listed = body_json(get(common::build_test_app(pool), "/images").await).await;
    assert_eq!(listed.as_array().unwrap().len(), 3);
    assert_eq!(listed[0]["source"], "test");
}
