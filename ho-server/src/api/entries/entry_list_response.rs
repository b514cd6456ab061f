use crate::EntryDto;
use crate::api::pagination::Pagination;

use serde::Serialize;

/// Paginated list of entries
#[derive(Debug, Serialize)]
pub struct EntryListResponse {
    pub entries: Vec<EntryDto>,
    pub pagination: Pagination,
}
