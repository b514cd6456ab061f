pub mod entries;
pub mod entry_dto;
pub mod entry_list_response;
pub mod entry_response;
pub mod list_entries_query;
pub mod save_entry_request;
pub mod stats_response;
