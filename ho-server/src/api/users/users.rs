//! User management REST API handlers (admin only)

use crate::api::extractors::caller::Caller;
use crate::api::pagination::{Pagination, page_window};
use crate::state::AppState;
use crate::{
    ApiError, ApiResult, CreateUserRequest, DeleteResponse, ListUsersQuery, UpdateUserRequest,
    UserDto, UserListResponse, UserResponse,
};

use ho_core::merge::FieldIssue;
use ho_core::{Role, User};
use ho_db::UserRepository;

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/v1/admin/users
///
/// List users with entry counts, optionally filtered by a search term
pub async fn list_users(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Json<UserListResponse>> {
    caller.require_admin()?;

    let (page, limit, offset) = page_window(query.page, query.limit);
    let search = query.search.as_deref();

    let repo = UserRepository::new(state.pool.clone());
    let total = repo.count(search).await?;
    let users = repo.list(search, limit, offset).await?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(UserDto::from).collect(),
        pagination: Pagination::new(page, limit, total),
    }))
}

/// POST /api/v1/admin/users
///
/// Create a user; 409 when the email is taken
pub async fn create_user(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    caller.require_admin()?;

    let (email, role) = validate_account(&request.email, Some(&request.password), &request.role)?;

    let repo = UserRepository::new(state.pool.clone());
    if repo.find_by_email(&email).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "A user with email {} already exists",
            email
        )));
    }

    let password_hash = hash_password(&request.password)?;
    let user = User::new(email, password_hash, normalized_name(request.name), role);
    repo.create(&user).await?;
    log::info!("User {} ({}) created by {}", user.id, user.email, caller.user_id);

    Ok((
        StatusCode::CREATED,
        Json(UserResponse { user: user.into() }),
    ))
}

/// GET /api/v1/admin/users/{id}
///
/// Get a single user by ID
pub async fn get_user(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    caller.require_admin()?;

    let user_id = Uuid::parse_str(&id)?;
    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;

    Ok(Json(UserResponse { user: user.into() }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Partially update a user; re-checks email uniqueness, re-hashes passwords
pub async fn update_user(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    caller.require_admin()?;

    let user_id = Uuid::parse_str(&id)?;
    let repo = UserRepository::new(state.pool.clone());
    let mut user = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;

    if let Some(email) = request.email {
        let email = email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::validation_field("Invalid email address", "email"));
        }
        if email != user.email {
            if let Some(existing) = repo.find_by_email(&email).await? {
                if existing.id != user.id {
                    return Err(ApiError::conflict(format!(
                        "A user with email {} already exists",
                        email
                    )));
                }
            }
            user.email = email;
        }
    }

    if let Some(password) = request.password {
        if password.is_empty() {
            return Err(ApiError::validation_field(
                "Password must not be empty",
                "password",
            ));
        }
        user.password_hash = hash_password(&password)?;
    }

    if let Some(name) = request.name {
        user.name = normalized_name(Some(name));
    }

    if let Some(role) = request.role {
        user.role = Role::from_str(&role)
            .map_err(|_| ApiError::validation_field("Unknown role", "role"))?;
    }

    user.updated_at = Utc::now();
    repo.update(&user).await?;
    log::info!("User {} updated by {}", user.id, caller.user_id);

    Ok(Json(UserResponse { user: user.into() }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Delete a user; deleting the calling account is refused
pub async fn delete_user(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    caller.require_admin()?;

    let user_id = Uuid::parse_str(&id)?;
    if user_id == caller.user_id {
        return Err(ApiError::bad_request("Cannot delete your own account"));
    }

    let repo = UserRepository::new(state.pool.clone());
    if !repo.delete(user_id).await? {
        return Err(ApiError::not_found(format!("User {} not found", id)));
    }
    log::info!("User {} deleted by {}", user_id, caller.user_id);

    Ok(Json(DeleteResponse { deleted_id: id }))
}

// =============================================================================
// Helpers
// =============================================================================

fn validate_account(
    email: &str,
    password: Option<&str>,
    role: &str,
) -> Result<(String, Role), ApiError> {
    let mut issues = Vec::new();

    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        issues.push(FieldIssue::new("email", "Invalid email address"));
    }
    if let Some(password) = password {
        if password.is_empty() {
            issues.push(FieldIssue::new("password", "Password must not be empty"));
        }
    }
    let role = match Role::from_str(role) {
        Ok(r) => Some(r),
        Err(_) => {
            issues.push(FieldIssue::new("role", "Unknown role"));
            None
        }
    };

    match role {
        Some(role) if issues.is_empty() => Ok((email.to_string(), role)),
        _ => Err(ApiError::validation("Validation failed", issues)),
    }
}

fn normalized_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| {
        log::error!("Password hashing failed: {}", e);
        ApiError::internal("Failed to hash password")
    })
}
