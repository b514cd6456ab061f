use serde::Serialize;

/// Acknowledges a successful delete
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted_id: String,
}
