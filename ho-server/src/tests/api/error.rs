use crate::ApiError;

use ho_core::merge::{FieldIssue, MergeError};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

#[tokio::test]
async fn test_unauthenticated_returns_401_with_json_body() {
    let error = ApiError::unauthenticated("Missing X-User-Id header");
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "UNAUTHENTICATED");
    assert_eq!(json["error"]["message"], "Missing X-User-Id header");
}

#[tokio::test]
async fn test_forbidden_returns_403_with_details() {
    let error = ApiError::forbidden(
        "Permission denied",
        vec![FieldIssue::new("health", "role 'doctor' may not write the health group")],
    );
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "FORBIDDEN");
    assert_eq!(json["error"]["details"][0]["field"], "health");
}

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let error = ApiError::not_found("Entry not found");
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Entry not found");
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::validation_field("Gender must be male or female", "gender");
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "gender");
}

#[tokio::test]
async fn test_validation_error_carries_per_field_details() {
    let error = ApiError::validation(
        "Validation failed",
        vec![
            FieldIssue::new("first_name", "First name is required"),
            FieldIssue::new("gender", "Gender must be male or female"),
        ],
    );
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let details = json["error"]["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["field"], "first_name");
}

#[tokio::test]
async fn test_conflict_returns_409() {
    let error = ApiError::conflict("A user with email a@b.c already exists");
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_internal_error_returns_500_without_details() {
    let error = ApiError::internal("Database operation failed");
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(json["error"].get("details").is_none());
}

#[test]
fn test_merge_permission_denied_maps_to_forbidden() {
    let error = ApiError::from(MergeError::PermissionDenied {
        reasons: vec![FieldIssue::new("role", "no permission")],
    });
    assert!(matches!(error, ApiError::Forbidden { .. }));
}

#[test]
fn test_merge_nothing_applied_capability_only_maps_to_forbidden() {
    let error = ApiError::from(MergeError::NothingApplied {
        denied: vec![FieldIssue::new("health", "may not write")],
        invalid: vec![],
    });
    assert!(matches!(error, ApiError::Forbidden { .. }));
}

#[test]
fn test_merge_nothing_applied_with_invalid_data_maps_to_validation() {
    let error = ApiError::from(MergeError::NothingApplied {
        denied: vec![],
        invalid: vec![FieldIssue::new("temp", "Temperature must be a number")],
    });
    assert!(matches!(error, ApiError::Validation { .. }));
}
