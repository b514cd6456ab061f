use ho_core::User;
use ho_db::UserWithEntryCount;

use serde::Serialize;

/// User DTO for JSON serialization. The password hash never leaves the server.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub created_at: i64,
    pub updated_at: i64,
    /// Entries this user originated; only populated by the list endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_count: Option<i64>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email,
            name: u.name,
            role: u.role.as_str().to_string(),
            created_at: u.created_at.timestamp(),
            updated_at: u.updated_at.timestamp(),
            entry_count: None,
        }
    }
}

impl From<UserWithEntryCount> for UserDto {
    fn from(u: UserWithEntryCount) -> Self {
        let mut dto = UserDto::from(u.user);
        dto.entry_count = Some(u.entry_count);
        dto
    }
}
