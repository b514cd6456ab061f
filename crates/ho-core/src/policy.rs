//! Role capability table.
//!
//! Each non-admin role owns exactly one field group; admin owns all three.
//! This table gates the merge operation server-side and is the authoritative
//! check regardless of what any UI allows.

use crate::models::field_group::FieldGroup;
use crate::models::role::Role;

impl Role {
    /// Whether this role may write the given field group.
    pub fn can_write(&self, group: FieldGroup) -> bool {
        matches!(
            (self, group),
            (Role::Admin, _)
                | (Role::User, FieldGroup::Demographic)
                | (Role::Nurse, FieldGroup::Health)
                | (Role::Doctor, FieldGroup::Medical)
        )
    }

    /// Whether this role may use the user-management surface.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}
