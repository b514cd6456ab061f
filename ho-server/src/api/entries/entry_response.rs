use crate::EntryDto;
use serde::Serialize;

/// Single entry response
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub entry: EntryDto,
}

/// Response to a create-or-update, naming the field groups that applied
#[derive(Debug, Serialize)]
pub struct SaveEntryResponse {
    pub entry: EntryDto,
    pub applied: Vec<String>,
}
