use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Account email, unique across users (required)
    pub email: String,

    /// Plaintext password, hashed server-side (required)
    pub password: String,

    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,

    /// One of admin, user, doctor, nurse (required)
    pub role: String,
}
