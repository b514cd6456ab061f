use crate::merge::DemographicFields;
use crate::models::gender::Gender;
use crate::models::marital_status::MaritalStatus;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A patient outreach record.
///
/// The three field groups (demographic, health, medical) are attributed
/// independently: each `*_created_by` names whoever last successfully wrote
/// that group. An attribution of `None` means the group was never populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: Uuid,

    // Demographic group
    pub first_name: String,
    pub middle_name: String,
    pub surname: String,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub religion: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub occupation: String,
    pub demographic_created_by: Option<Uuid>,

    // Health group
    pub bp: Option<String>,
    pub temp: Option<f64>,
    pub weight: Option<f64>,
    pub health_created_by: Option<Uuid>,

    // Medical group
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub medical_created_by: Option<Uuid>,

    // Audit
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Create a fresh entry from validated demographics. Health and medical
    /// groups start unpopulated, with no attribution.
    pub fn new(demographics: DemographicFields, created_by: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: demographics.first_name,
            middle_name: demographics.middle_name,
            surname: demographics.surname,
            gender: demographics.gender,
            marital_status: demographics.marital_status,
            religion: demographics.religion,
            date_of_birth: demographics.date_of_birth,
            phone_number: demographics.phone_number,
            occupation: demographics.occupation,
            demographic_created_by: Some(created_by),
            bp: None,
            temp: None,
            weight: None,
            health_created_by: None,
            diagnosis: None,
            treatment: None,
            medical_created_by: None,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whole years of age on `today`. A date of birth in the future counts
    /// as age 0.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        today.years_since(self.date_of_birth).unwrap_or(0)
    }
}
