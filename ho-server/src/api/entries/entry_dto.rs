use ho_core::Entry;

use serde::Serialize;

/// Entry DTO for JSON serialization
#[derive(Debug, Serialize)]
pub struct EntryDto {
    pub id: String,

    pub first_name: String,
    pub middle_name: String,
    pub surname: String,
    pub gender: String,
    pub marital_status: String,
    pub religion: String,
    pub date_of_birth: String,
    pub phone_number: String,
    pub occupation: String,
    pub demographic_created_by: Option<String>,

    pub bp: Option<String>,
    pub temp: Option<f64>,
    pub weight: Option<f64>,
    pub health_created_by: Option<String>,

    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub medical_created_by: Option<String>,

    pub created_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Entry> for EntryDto {
    fn from(e: Entry) -> Self {
        Self {
            id: e.id.to_string(),
            first_name: e.first_name,
            middle_name: e.middle_name,
            surname: e.surname,
            gender: e.gender.as_str().to_string(),
            marital_status: e.marital_status.as_str().to_string(),
            religion: e.religion,
            date_of_birth: e.date_of_birth.format("%Y-%m-%d").to_string(),
            phone_number: e.phone_number,
            occupation: e.occupation,
            demographic_created_by: e.demographic_created_by.map(|id| id.to_string()),
            bp: e.bp,
            temp: e.temp,
            weight: e.weight,
            health_created_by: e.health_created_by.map(|id| id.to_string()),
            diagnosis: e.diagnosis,
            treatment: e.treatment,
            medical_created_by: e.medical_created_by.map(|id| id.to_string()),
            created_by: e.created_by.to_string(),
            created_at: e.created_at.timestamp(),
            updated_at: e.updated_at.timestamp(),
        }
    }
}
