pub mod entry;
pub mod field_group;
pub mod gender;
pub mod marital_status;
pub mod role;
pub mod user;
