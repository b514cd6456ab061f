pub mod delete_response;
pub mod entries;
pub mod error;
pub mod extractors;
pub mod pagination;
pub mod users;
