use crate::state::AppState;
use crate::{ApiError, Caller};

use ho_core::{FieldGroup, Role};

use axum::extract::FromRequestParts;
use axum::http::Request;
use axum::http::request::Parts;
use sqlx::SqlitePool;
use uuid::Uuid;

async fn test_state() -> AppState {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Failed to create test pool");
    AppState { pool }
}

fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
    let mut builder = Request::builder().uri("/api/v1/entries");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let (parts, _) = builder.body(()).unwrap().into_parts();
    parts
}

#[tokio::test]
async fn test_valid_headers_resolve_caller() {
    let state = test_state().await;
    let user_id = Uuid::new_v4();
    let mut parts = parts_with_headers(&[
        ("X-User-Id", user_id.to_string().as_str()),
        ("X-User-Role", "nurse"),
    ]);

    let caller = Caller::from_request_parts(&mut parts, &state).await.unwrap();

    assert_eq!(caller.user_id, user_id);
    assert_eq!(caller.role, Role::Nurse);
    assert!(caller.can_write(FieldGroup::Health));
    assert!(!caller.can_write(FieldGroup::Medical));
}

#[tokio::test]
async fn test_missing_user_id_rejects_unauthenticated() {
    let state = test_state().await;
    let mut parts = parts_with_headers(&[("X-User-Role", "admin")]);

    let result = Caller::from_request_parts(&mut parts, &state).await;

    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}

#[tokio::test]
async fn test_malformed_user_id_rejects_unauthenticated() {
    let state = test_state().await;
    let mut parts =
        parts_with_headers(&[("X-User-Id", "not-a-uuid"), ("X-User-Role", "admin")]);

    let result = Caller::from_request_parts(&mut parts, &state).await;

    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}

#[tokio::test]
async fn test_unknown_role_rejects_unauthenticated() {
    let state = test_state().await;
    let user_id = Uuid::new_v4().to_string();
    let mut parts =
        parts_with_headers(&[("X-User-Id", user_id.as_str()), ("X-User-Role", "wizard")]);

    let result = Caller::from_request_parts(&mut parts, &state).await;

    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}

#[tokio::test]
async fn test_require_admin_gates_non_admin_roles() {
    let caller = Caller {
        user_id: Uuid::new_v4(),
        role: Role::Doctor,
    };
    assert!(matches!(
        caller.require_admin(),
        Err(ApiError::Forbidden { .. })
    ));

    let admin = Caller {
        user_id: Uuid::new_v4(),
        role: Role::Admin,
    };
    assert!(admin.require_admin().is_ok());
}
