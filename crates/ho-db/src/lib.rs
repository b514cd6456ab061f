pub mod error;
pub mod repositories;

pub use error::{DbError, Result};
pub use repositories::entry_repository::{EntryFilter, EntryRepository, EntryStats, GroupCount};
pub use repositories::user_repository::{UserRepository, UserWithEntryCount};
