pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    delete_response::DeleteResponse,
    entries::{
        entries::{entry_analytics, entry_stats, get_entry, list_entries, save_entry},
        entry_dto::EntryDto,
        entry_list_response::EntryListResponse,
        entry_response::{EntryResponse, SaveEntryResponse},
        list_entries_query::ListEntriesQuery,
        save_entry_request::SaveEntryRequest,
        stats_response::{GroupCountDto, StatsResponse},
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::caller::Caller,
    users::{
        create_user_request::CreateUserRequest,
        list_users_query::ListUsersQuery,
        update_user_request::UpdateUserRequest,
        user_dto::UserDto,
        user_response::{UserListResponse, UserResponse},
        users::{create_user, delete_user, get_user, list_users, update_user},
    },
};

pub use crate::routes::build_router;
pub use crate::state::AppState;
