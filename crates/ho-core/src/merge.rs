//! Role-gated partial-update merge for entries.
//!
//! An incoming payload is split into the three field groups. Each group the
//! caller is permitted to write is validated on its own; valid groups are
//! applied to the entry and stamp that group's attribution. Groups the
//! caller cannot write, did not supply, or supplied invalid data for are
//! left untouched. The operation as a whole fails only under the rules of
//! [`create_entry`] and [`update_entry`].

use crate::models::entry::Entry;
use crate::models::field_group::FieldGroup;
use crate::models::gender::Gender;
use crate::models::marital_status::MaritalStatus;
use crate::models::role::Role;

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single field-level problem, reported back to the client.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Raw entry payload as submitted by a client. Every field is optional;
/// which ones matter depends on the caller's role. Numeric health fields
/// arrive as strings, matching the form encoding the clients use.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryDraft {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub surname: Option<String>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub religion: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub occupation: Option<String>,

    pub bp: Option<String>,
    pub temp: Option<String>,
    pub weight: Option<String>,

    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
}

/// Validated demographic group. All fields are required.
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicFields {
    pub first_name: String,
    pub middle_name: String,
    pub surname: String,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub religion: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub occupation: String,
}

/// Validated health group. Empty strings collapse to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthFields {
    pub bp: Option<String>,
    pub temp: Option<f64>,
    pub weight: Option<f64>,
}

/// Validated medical group. Free text, so validation is total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedicalFields {
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
}

/// A validated group tagged with which group it is.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldGroupData {
    Demographic(DemographicFields),
    Health(HealthFields),
    Medical(MedicalFields),
}

impl FieldGroupData {
    pub fn group(&self) -> FieldGroup {
        match self {
            Self::Demographic(_) => FieldGroup::Demographic,
            Self::Health(_) => FieldGroup::Health,
            Self::Medical(_) => FieldGroup::Medical,
        }
    }
}

impl EntryDraft {
    /// Whether the payload carries any field belonging to `group`. A group
    /// that is entirely absent is never applied and never an error.
    pub fn supplies(&self, group: FieldGroup) -> bool {
        match group {
            FieldGroup::Demographic => {
                self.first_name.is_some()
                    || self.middle_name.is_some()
                    || self.surname.is_some()
                    || self.gender.is_some()
                    || self.marital_status.is_some()
                    || self.religion.is_some()
                    || self.date_of_birth.is_some()
                    || self.phone_number.is_some()
                    || self.occupation.is_some()
            }
            FieldGroup::Health => {
                self.bp.is_some() || self.temp.is_some() || self.weight.is_some()
            }
            FieldGroup::Medical => self.diagnosis.is_some() || self.treatment.is_some(),
        }
    }

    /// Validate the demographic group: every field required and non-empty,
    /// enums and date parsed.
    pub fn demographics(&self) -> Result<DemographicFields, Vec<FieldIssue>> {
        let mut issues = Vec::new();

        let first_name = required(&self.first_name, "first_name", "First name is required", &mut issues);
        let middle_name = required(&self.middle_name, "middle_name", "Middle name is required", &mut issues);
        let surname = required(&self.surname, "surname", "Surname is required", &mut issues);
        let religion = required(&self.religion, "religion", "Religion is required", &mut issues);
        let phone_number = required(&self.phone_number, "phone_number", "Phone number is required", &mut issues);
        let occupation = required(&self.occupation, "occupation", "Occupation is required", &mut issues);

        let gender = match self.gender.as_deref() {
            Some(s) => match Gender::from_str(s) {
                Ok(g) => Some(g),
                Err(_) => {
                    issues.push(FieldIssue::new("gender", "Gender must be male or female"));
                    None
                }
            },
            None => {
                issues.push(FieldIssue::new("gender", "Gender must be male or female"));
                None
            }
        };

        let marital_status = match self.marital_status.as_deref() {
            Some(s) => match MaritalStatus::from_str(s) {
                Ok(m) => Some(m),
                Err(_) => {
                    issues.push(FieldIssue::new("marital_status", "Invalid marital status"));
                    None
                }
            },
            None => {
                issues.push(FieldIssue::new("marital_status", "Invalid marital status"));
                None
            }
        };

        let date_of_birth = match self.date_of_birth.as_deref() {
            Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    issues.push(FieldIssue::new("date_of_birth", "Invalid date format"));
                    None
                }
            },
            None => {
                issues.push(FieldIssue::new("date_of_birth", "Invalid date format"));
                None
            }
        };

        if !issues.is_empty() {
            return Err(issues);
        }

        // All `None` arms above pushed an issue, so unwraps cannot be hit.
        Ok(DemographicFields {
            first_name: first_name.unwrap(),
            middle_name: middle_name.unwrap(),
            surname: surname.unwrap(),
            gender: gender.unwrap(),
            marital_status: marital_status.unwrap(),
            religion: religion.unwrap(),
            date_of_birth: date_of_birth.unwrap(),
            phone_number: phone_number.unwrap(),
            occupation: occupation.unwrap(),
        })
    }

    /// Validate the health group: numeric-or-null, empty strings become null.
    pub fn health(&self) -> Result<HealthFields, Vec<FieldIssue>> {
        let mut issues = Vec::new();

        let temp = numeric_or_null(&self.temp, "temp", "Temperature must be a number", &mut issues);
        let weight = numeric_or_null(&self.weight, "weight", "Weight must be a number", &mut issues);

        if !issues.is_empty() {
            return Err(issues);
        }

        Ok(HealthFields {
            bp: non_empty(&self.bp),
            temp,
            weight,
        })
    }

    /// The medical group is free-text-or-null; this cannot fail.
    pub fn medical(&self) -> MedicalFields {
        MedicalFields {
            diagnosis: non_empty(&self.diagnosis),
            treatment: non_empty(&self.treatment),
        }
    }
}

fn required(
    value: &Option<String>,
    field: &str,
    message: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => {
            issues.push(FieldIssue::new(field, message));
            None
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn numeric_or_null(
    value: &Option<String>,
    field: &str,
    message: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<f64> {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => match s.parse::<f64>() {
            Ok(n) => Some(n),
            Err(_) => {
                issues.push(FieldIssue::new(field, message));
                None
            }
        },
        _ => None,
    }
}

/// Overwrite one field group on an entry and stamp its attribution.
/// Total and side-effect-free beyond the entry itself.
pub fn apply_group(entry: &mut Entry, data: FieldGroupData, editor: Uuid, now: DateTime<Utc>) {
    match data {
        FieldGroupData::Demographic(d) => {
            entry.first_name = d.first_name;
            entry.middle_name = d.middle_name;
            entry.surname = d.surname;
            entry.gender = d.gender;
            entry.marital_status = d.marital_status;
            entry.religion = d.religion;
            entry.date_of_birth = d.date_of_birth;
            entry.phone_number = d.phone_number;
            entry.occupation = d.occupation;
            entry.demographic_created_by = Some(editor);
        }
        FieldGroupData::Health(h) => {
            entry.bp = h.bp;
            entry.temp = h.temp;
            entry.weight = h.weight;
            entry.health_created_by = Some(editor);
        }
        FieldGroupData::Medical(m) => {
            entry.diagnosis = m.diagnosis;
            entry.treatment = m.treatment;
            entry.medical_created_by = Some(editor);
        }
    }
    entry.updated_at = now;
}

/// Why a merge was rejected as a whole. Per-group skips are not errors;
/// they only surface here when nothing could be applied at all.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeError {
    /// The caller's role cannot write what the operation requires.
    PermissionDenied { reasons: Vec<FieldIssue> },
    /// Required data failed validation (creation only).
    Validation { issues: Vec<FieldIssue> },
    /// Update applied zero groups. `denied` holds capability refusals,
    /// `invalid` holds per-field validation failures.
    NothingApplied {
        denied: Vec<FieldIssue>,
        invalid: Vec<FieldIssue>,
    },
}

/// Build a new entry from the draft. The demographic group is mandatory:
/// the caller must be permitted to write it and it must validate. Health
/// and medical data riding along are applied opportunistically when the
/// role allows and the data validates; otherwise they stay unpopulated.
pub fn create_entry(
    draft: &EntryDraft,
    role: Role,
    editor: Uuid,
    now: DateTime<Utc>,
) -> Result<Entry, MergeError> {
    if !role.can_write(FieldGroup::Demographic) {
        return Err(MergeError::PermissionDenied {
            reasons: vec![FieldIssue::new(
                "role",
                format!("role '{}' does not have permission to create entries", role),
            )],
        });
    }

    let demographics = draft
        .demographics()
        .map_err(|issues| MergeError::Validation { issues })?;

    let mut entry = Entry::new(demographics, editor, now);

    if role.can_write(FieldGroup::Health) && draft.supplies(FieldGroup::Health) {
        if let Ok(health) = draft.health() {
            apply_group(&mut entry, FieldGroupData::Health(health), editor, now);
        }
    }
    if role.can_write(FieldGroup::Medical) && draft.supplies(FieldGroup::Medical) {
        apply_group(
            &mut entry,
            FieldGroupData::Medical(draft.medical()),
            editor,
            now,
        );
    }

    Ok(entry)
}

/// Merge the draft into an existing entry. Each group applies independently
/// when the caller has its capability, supplied it, and it validates.
/// Rejects (leaving the entry untouched by the caller's standards: no
/// partial write is persisted) only when zero groups applied.
///
/// Returns the groups that were applied.
pub fn update_entry(
    entry: &mut Entry,
    draft: &EntryDraft,
    role: Role,
    editor: Uuid,
    now: DateTime<Utc>,
) -> Result<Vec<FieldGroup>, MergeError> {
    let mut applied = Vec::new();
    let mut denied = Vec::new();
    let mut invalid = Vec::new();

    for group in FieldGroup::ALL {
        if !draft.supplies(group) {
            continue;
        }
        if !role.can_write(group) {
            denied.push(FieldIssue::new(
                group.as_str(),
                format!("role '{}' may not write the {} group", role, group.as_str()),
            ));
            continue;
        }
        let data = match group {
            FieldGroup::Demographic => match draft.demographics() {
                Ok(d) => FieldGroupData::Demographic(d),
                Err(issues) => {
                    invalid.extend(issues);
                    continue;
                }
            },
            FieldGroup::Health => match draft.health() {
                Ok(h) => FieldGroupData::Health(h),
                Err(issues) => {
                    invalid.extend(issues);
                    continue;
                }
            },
            FieldGroup::Medical => FieldGroupData::Medical(draft.medical()),
        };
        apply_group(entry, data, editor, now);
        applied.push(group);
    }

    if applied.is_empty() {
        if denied.is_empty() && invalid.is_empty() {
            invalid.push(FieldIssue::new(
                "body",
                "payload contains no entry fields to apply",
            ));
        }
        return Err(MergeError::NothingApplied { denied, invalid });
    }

    Ok(applied)
}
