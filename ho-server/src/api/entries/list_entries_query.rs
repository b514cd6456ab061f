use serde::Deserialize;

/// Query parameters for listing, stats and analytics over entries.
///
/// `min_age`/`max_age` are whole years; the handler translates them to a
/// date-of-birth window before they reach the repository.
#[derive(Debug, Default, Deserialize)]
pub struct ListEntriesQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,

    pub gender: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    /// Free-text search over name parts, phone number and occupation
    pub search: Option<String>,
}
