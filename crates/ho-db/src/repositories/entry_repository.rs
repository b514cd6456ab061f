//! Entry repository: CRUD and aggregate queries over outreach entries.
//!
//! Merging of role-gated field groups happens in ho-core before anything
//! reaches this layer; every write here persists a full row, so each
//! create/update is a single row-atomic statement (last write wins).

use crate::repositories::{parse_opt_uuid, parse_timestamp, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use ho_core::{Entry, Gender, MaritalStatus};

use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

/// Filters accepted by the list/stats/analytics queries. Age bounds are
/// translated to a date-of-birth window by the caller, so the repository
/// only ever sees dates.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub gender: Option<Gender>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    pub min_birth_date: Option<NaiveDate>,
    pub max_birth_date: Option<NaiveDate>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GroupCount {
    pub label: String,
    pub count: i64,
}

/// SQL-side aggregate summary for the stats endpoint.
#[derive(Debug, Clone)]
pub struct EntryStats {
    pub total: i64,
    pub gender: Vec<GroupCount>,
    pub diagnosis: Vec<GroupCount>,
    pub treatment: Vec<GroupCount>,
    pub average_weight: Option<f64>,
    pub average_temp: Option<f64>,
}

const ENTRY_COLUMNS: &str = "id, first_name, middle_name, surname, gender, marital_status, \
     religion, date_of_birth, phone_number, occupation, demographic_created_by, \
     bp, temp, weight, health_created_by, \
     diagnosis, treatment, medical_created_by, \
     created_by, created_at, updated_at";

pub struct EntryRepository {
    pool: SqlitePool,
}

impl EntryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, entry: &Entry) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO ho_entries (
                    id, first_name, middle_name, surname, gender, marital_status,
                    religion, date_of_birth, phone_number, occupation, demographic_created_by,
                    bp, temp, weight, health_created_by,
                    diagnosis, treatment, medical_created_by,
                    created_by, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.id.to_string())
        .bind(&entry.first_name)
        .bind(&entry.middle_name)
        .bind(&entry.surname)
        .bind(entry.gender.as_str())
        .bind(entry.marital_status.as_str())
        .bind(&entry.religion)
        .bind(entry.date_of_birth)
        .bind(&entry.phone_number)
        .bind(&entry.occupation)
        .bind(entry.demographic_created_by.map(|id| id.to_string()))
        .bind(&entry.bp)
        .bind(entry.temp)
        .bind(entry.weight)
        .bind(entry.health_created_by.map(|id| id.to_string()))
        .bind(&entry.diagnosis)
        .bind(&entry.treatment)
        .bind(entry.medical_created_by.map(|id| id.to_string()))
        .bind(entry.created_by.to_string())
        .bind(entry.created_at.timestamp())
        .bind(entry.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update(&self, entry: &Entry) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                UPDATE ho_entries
                SET first_name = ?, middle_name = ?, surname = ?, gender = ?,
                    marital_status = ?, religion = ?, date_of_birth = ?,
                    phone_number = ?, occupation = ?, demographic_created_by = ?,
                    bp = ?, temp = ?, weight = ?, health_created_by = ?,
                    diagnosis = ?, treatment = ?, medical_created_by = ?,
                    updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(&entry.first_name)
        .bind(&entry.middle_name)
        .bind(&entry.surname)
        .bind(entry.gender.as_str())
        .bind(entry.marital_status.as_str())
        .bind(&entry.religion)
        .bind(entry.date_of_birth)
        .bind(&entry.phone_number)
        .bind(&entry.occupation)
        .bind(entry.demographic_created_by.map(|id| id.to_string()))
        .bind(&entry.bp)
        .bind(entry.temp)
        .bind(entry.weight)
        .bind(entry.health_created_by.map(|id| id.to_string()))
        .bind(&entry.diagnosis)
        .bind(&entry.treatment)
        .bind(entry.medical_created_by.map(|id| id.to_string()))
        .bind(entry.updated_at.timestamp())
        .bind(entry.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Entry>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM ho_entries WHERE id = ?",
            ENTRY_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| entry_from_row(&r)).transpose()
    }

    /// Filtered page, newest first.
    pub async fn list(
        &self,
        filter: &EntryFilter,
        limit: i64,
        offset: i64,
    ) -> DbErrorResult<Vec<Entry>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM ho_entries",
            ENTRY_COLUMNS
        ));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(entry_from_row).collect()
    }

    /// Every entry matching the filter, in insertion-stable id order.
    /// Feeds the in-process analytics rollup.
    pub async fn list_all(&self, filter: &EntryFilter) -> DbErrorResult<Vec<Entry>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM ho_entries",
            ENTRY_COLUMNS
        ));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY id");

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(entry_from_row).collect()
    }

    pub async fn count(&self, filter: &EntryFilter) -> DbErrorResult<i64> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM ho_entries");
        push_filters(&mut qb, filter);

        let count = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Aggregate summary computed SQL-side.
    pub async fn stats(&self, filter: &EntryFilter) -> DbErrorResult<EntryStats> {
        let total = self.count(filter).await?;

        let gender = self.grouped_count("gender", filter, false).await?;
        let diagnosis = self.grouped_count("diagnosis", filter, true).await?;
        let treatment = self.grouped_count("treatment", filter, true).await?;

        let average_weight = self.average("weight", filter).await?;
        let average_temp = self.average("temp", filter).await?;

        Ok(EntryStats {
            total,
            gender,
            diagnosis,
            treatment,
            average_weight,
            average_temp,
        })
    }

    async fn grouped_count(
        &self,
        column: &str,
        filter: &EntryFilter,
        skip_null: bool,
    ) -> DbErrorResult<Vec<GroupCount>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {column} AS label, COUNT(*) AS n FROM ho_entries"
        ));
        push_filters(&mut qb, filter);
        if skip_null {
            qb.push(format!(" AND {column} IS NOT NULL"));
        }
        qb.push(format!(" GROUP BY {column} ORDER BY {column}"));

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter()
            .map(|r| -> DbErrorResult<GroupCount> {
                Ok(GroupCount {
                    label: r.try_get("label")?,
                    count: r.try_get("n")?,
                })
            })
            .collect()
    }

    async fn average(&self, column: &str, filter: &EntryFilter) -> DbErrorResult<Option<f64>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT AVG({column}) FROM ho_entries"));
        push_filters(&mut qb, filter);

        let avg = qb
            .build_query_scalar::<Option<f64>>()
            .fetch_one(&self.pool)
            .await?;
        Ok(avg)
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &EntryFilter) {
    // Uniform "WHERE 1=1" so every condition (and grouped_count's NULL
    // guard) can append with AND.
    qb.push(" WHERE 1=1");

    if let Some(gender) = filter.gender {
        qb.push(" AND gender = ");
        qb.push_bind(gender.as_str());
    }
    if let Some(ref diagnosis) = filter.diagnosis {
        qb.push(" AND diagnosis LIKE ");
        qb.push_bind(format!("%{}%", diagnosis));
    }
    if let Some(ref treatment) = filter.treatment {
        qb.push(" AND treatment LIKE ");
        qb.push_bind(format!("%{}%", treatment));
    }
    if let Some(min_weight) = filter.min_weight {
        qb.push(" AND weight >= ");
        qb.push_bind(min_weight);
    }
    if let Some(max_weight) = filter.max_weight {
        qb.push(" AND weight <= ");
        qb.push_bind(max_weight);
    }
    // ISO dates stored as TEXT compare correctly as strings.
    if let Some(min_birth_date) = filter.min_birth_date {
        qb.push(" AND date_of_birth >= ");
        qb.push_bind(min_birth_date);
    }
    if let Some(max_birth_date) = filter.max_birth_date {
        qb.push(" AND date_of_birth <= ");
        qb.push_bind(max_birth_date);
    }
    if let Some(ref search) = filter.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (first_name LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR middle_name LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR surname LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR phone_number LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR occupation LIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
}

fn entry_from_row(row: &SqliteRow) -> DbErrorResult<Entry> {
    let gender_raw: String = row.try_get("gender")?;
    let marital_raw: String = row.try_get("marital_status")?;

    Ok(Entry {
        id: parse_uuid(row.try_get::<String, _>("id")?.as_str(), "entry.id")?,
        first_name: row.try_get("first_name")?,
        middle_name: row.try_get("middle_name")?,
        surname: row.try_get("surname")?,
        gender: Gender::from_str(&gender_raw)
            .map_err(|e| DbError::decode(format!("Invalid gender in entry.gender: {}", e)))?,
        marital_status: MaritalStatus::from_str(&marital_raw).map_err(|e| {
            DbError::decode(format!(
                "Invalid marital status in entry.marital_status: {}",
                e
            ))
        })?,
        religion: row.try_get("religion")?,
        date_of_birth: row.try_get("date_of_birth")?,
        phone_number: row.try_get("phone_number")?,
        occupation: row.try_get("occupation")?,
        demographic_created_by: parse_opt_uuid(
            row.try_get::<Option<String>, _>("demographic_created_by")?.as_deref(),
            "entry.demographic_created_by",
        )?,
        bp: row.try_get("bp")?,
        temp: row.try_get("temp")?,
        weight: row.try_get("weight")?,
        health_created_by: parse_opt_uuid(
            row.try_get::<Option<String>, _>("health_created_by")?.as_deref(),
            "entry.health_created_by",
        )?,
        diagnosis: row.try_get("diagnosis")?,
        treatment: row.try_get("treatment")?,
        medical_created_by: parse_opt_uuid(
            row.try_get::<Option<String>, _>("medical_created_by")?.as_deref(),
            "entry.medical_created_by",
        )?,
        created_by: parse_uuid(
            row.try_get::<String, _>("created_by")?.as_str(),
            "entry.created_by",
        )?,
        created_at: parse_timestamp(row.try_get("created_at")?, "entry.created_at")?,
        updated_at: parse_timestamp(row.try_get("updated_at")?, "entry.updated_at")?,
    })
}
