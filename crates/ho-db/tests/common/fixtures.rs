#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use ho_core::{Entry, Gender, MaritalStatus, Role, User};
use uuid::Uuid;

fn second_precision_now() -> DateTime<Utc> {
    // Timestamps persist as whole seconds; truncate so round trips compare equal.
    DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap()
}

/// Creates a demographics-only test Entry
pub fn create_test_entry(created_by: Uuid) -> Entry {
    let now = second_precision_now();
    Entry {
        id: Uuid::new_v4(),
        first_name: "Amina".to_string(),
        middle_name: "K".to_string(),
        surname: "Okafor".to_string(),
        gender: Gender::Female,
        marital_status: MaritalStatus::Single,
        religion: "None".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
        phone_number: "08012345678".to_string(),
        occupation: "Teacher".to_string(),
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

/// Creates a test Entry with all three field groups populated
pub fn create_full_test_entry(created_by: Uuid) -> Entry {
    let mut entry = create_test_entry(created_by);
    entry.bp = Some("120/80".to_string());
    entry.temp = Some(36.8);
    entry.weight = Some(64.5);
    entry.health_created_by = Some(created_by);
    entry.diagnosis = Some("Malaria".to_string());
    entry.treatment = Some("ACT".to_string());
    entry.medical_created_by = Some(created_by);
    entry
}

/// Creates a test User with a fixed hash
pub fn create_test_account(email: &str, role: Role) -> User {
    let now = second_precision_now();
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: "$2b$12$fixedfixedfixedfixedfixedfixedfixedfixedfixedfixedfff".to_string(),
        name: Some("Test Account".to_string()),
        role,
        created_at: now,
        updated_at: now,
    }
}
