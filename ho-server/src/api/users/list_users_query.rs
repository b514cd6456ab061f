use serde::Deserialize;

/// Query parameters for the admin user listing
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Substring match over email and name
    pub search: Option<String>,
}
