#![allow(dead_code)]

//! Test infrastructure for ho-server API tests

use ho_server::AppState;

use axum::body::Body;
use axum::http::Request;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    // In-memory needs a single connection
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("../crates/ho-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing
pub async fn create_test_app_state() -> AppState {
    AppState {
        pool: create_test_pool().await,
    }
}

/// Insert a user row directly, for callers and foreign keys
pub async fn create_test_user(pool: &SqlitePool, user_id: Uuid, role: &str) {
    sqlx::query(
        "INSERT OR IGNORE INTO users (id, email, password_hash, role, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id.to_string())
    .bind(format!("{}@test.local", user_id))
    .bind("hash")
    .bind(role)
    .bind(chrono::Utc::now().timestamp())
    .bind(chrono::Utc::now().timestamp())
    .execute(pool)
    .await
    .expect("Failed to create test user");
}

/// Build a request carrying the identity headers
pub fn authed_request(method: &str, uri: &str, user_id: Uuid, role: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-User-Id", user_id.to_string())
        .header("X-User-Role", role)
        .body(Body::empty())
        .unwrap()
}

/// Build a JSON request carrying the identity headers
pub fn authed_json_request(
    method: &str,
    uri: &str,
    user_id: Uuid,
    role: &str,
    body: &Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-User-Id", user_id.to_string())
        .header("X-User-Role", role)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A complete, valid demographic payload
pub fn demographic_body() -> Value {
    json!({
        "first_name": "Amina",
        "middle_name": "K",
        "surname": "Okafor",
        "gender": "female",
        "marital_status": "single",
        "religion": "None",
        "date_of_birth": "1990-04-12",
        "phone_number": "08012345678",
        "occupation": "Teacher",
    })
}
