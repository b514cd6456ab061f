use crate::UserDto;
use crate::api::pagination::Pagination;

use serde::Serialize;

/// Single user response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserDto,
}

/// Paginated list of users
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserDto>,
    pub pagination: Pagination,
}
