pub mod analytics;
pub mod error;
pub mod merge;
pub mod models;
pub mod policy;


pub use error::{CoreError, Result as CoreResult};
pub use merge::{
    DemographicFields, EntryDraft, FieldGroupData, FieldIssue, HealthFields, MedicalFields,
    MergeError, apply_group, create_entry, update_entry,
};
pub use models::entry::Entry;
pub use models::field_group::FieldGroup;
pub use models::gender::Gender;
pub use models::marital_status::MaritalStatus;
pub use models::role::Role;
pub use models::user::User;
