//! Axum extractors for REST API authentication

use crate::ApiError;
use crate::state::AppState;

use ho_core::{FieldGroup, Role};

use std::str::FromStr;

use axum::{extract::FromRequestParts, http::request::Parts};
use ho_core::merge::FieldIssue;
use uuid::Uuid;

/// The resolved caller identity.
///
/// Session handling lives in an upstream collaborator; by the time a request
/// reaches this service it carries `X-User-Id` and `X-User-Role` headers.
/// Missing or malformed headers reject with 401 before any data access.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: Role,
}

impl Caller {
    /// 403 unless the caller is an admin. Gates the user-management surface.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(ApiError::forbidden(
                "Admin role required",
                vec![FieldIssue::new(
                    "role",
                    format!("role '{}' may not manage users", self.role),
                )],
            ))
        }
    }

    /// Convenience passthrough to the role policy.
    pub fn can_write(&self, group: FieldGroup) -> bool {
        self.role.can_write(group)
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;

        let user_id = headers
            .get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthenticated("Missing X-User-Id header"))?;
        let user_id = Uuid::parse_str(user_id).map_err(|_| {
            log::warn!("Invalid UUID in X-User-Id header: {}", user_id);
            ApiError::unauthenticated("Invalid X-User-Id header")
        })?;

        let role = headers
            .get("X-User-Role")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthenticated("Missing X-User-Role header"))?;
        let role = Role::from_str(role).map_err(|_| {
            log::warn!("Unknown role in X-User-Role header: {}", role);
            ApiError::unauthenticated("Invalid X-User-Role header")
        })?;

        Ok(Caller { user_id, role })
    }
}
