use serde::{Deserialize, Serialize};

/// One of the three independently-attributed sections of an entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Demographic,
    Health,
    Medical,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 3] = [Self::Demographic, Self::Health, Self::Medical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Demographic => "demographic",
            Self::Health => "health",
            Self::Medical => "medical",
        }
    }
}
