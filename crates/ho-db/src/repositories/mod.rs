pub mod entry_repository;
pub mod user_repository;

use crate::{DbError, Result};

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub(crate) fn parse_uuid(value: &str, column: &str) -> Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| DbError::decode(format!("Invalid UUID in {}: {}", column, e)))
}

pub(crate) fn parse_opt_uuid(value: Option<&str>, column: &str) -> Result<Option<Uuid>> {
    value.map(|s| parse_uuid(s, column)).transpose()
}

pub(crate) fn parse_timestamp(secs: i64, column: &str) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DbError::decode(format!("Invalid timestamp in {}", column)))
}
