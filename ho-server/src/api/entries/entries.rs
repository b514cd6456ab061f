//! Entry REST API handlers
//!
//! One save endpoint serves create and update; listing, stats and the
//! analytics rollup share a common filter set.

use crate::api::extractors::caller::Caller;
use crate::api::pagination::{Pagination, page_window};
use crate::state::AppState;
use crate::{
    ApiError, ApiResult, EntryDto, EntryListResponse, EntryResponse, ListEntriesQuery,
    SaveEntryRequest, SaveEntryResponse, StatsResponse,
};

use ho_core::analytics::{AnalyticsReport, rollup};
use ho_core::merge::{create_entry, update_entry};
use ho_core::{Entry, FieldGroup, Gender};
use ho_db::{EntryFilter, EntryRepository};

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Days, Months, NaiveDate, Utc};
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/v1/entries
///
/// Create or update an entry, disambiguated by `id` in the body.
/// 201 on create, 200 on update.
pub async fn save_entry(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<SaveEntryRequest>,
) -> ApiResult<Response> {
    let repo = EntryRepository::new(state.pool.clone());
    let now = Utc::now();

    match request.id {
        None => {
            let entry = create_entry(&request.draft, caller.role, caller.user_id, now)?;
            repo.create(&entry).await?;
            log::info!("Entry {} created by {}", entry.id, caller.user_id);

            let applied = applied_groups(&entry);
            Ok((
                StatusCode::CREATED,
                Json(SaveEntryResponse {
                    entry: entry.into(),
                    applied,
                }),
            )
                .into_response())
        }
        Some(id) => {
            let entry_id = Uuid::parse_str(&id)?;
            let mut entry = repo
                .find_by_id(entry_id)
                .await?
                .ok_or_else(|| ApiError::not_found(format!("Entry {} not found", id)))?;

            let applied = update_entry(&mut entry, &request.draft, caller.role, caller.user_id, now)?;
            repo.update(&entry).await?;
            log::info!(
                "Entry {} updated by {} (groups: {:?})",
                entry.id,
                caller.user_id,
                applied
            );

            Ok((
                StatusCode::OK,
                Json(SaveEntryResponse {
                    entry: entry.into(),
                    applied: applied.iter().map(|g| g.as_str().to_string()).collect(),
                }),
            )
                .into_response())
        }
    }
}

/// GET /api/v1/entries
///
/// List entries newest first, with filters and pagination
pub async fn list_entries(
    State(state): State<AppState>,
    _caller: Caller,
    Query(query): Query<ListEntriesQuery>,
) -> ApiResult<Json<EntryListResponse>> {
    let filter = build_filter(&query, Utc::now().date_naive())?;
    let (page, limit, offset) = page_window(query.page, query.limit);

    let repo = EntryRepository::new(state.pool.clone());
    let total = repo.count(&filter).await?;
    let entries = repo.list(&filter, limit, offset).await?;

    Ok(Json(EntryListResponse {
        entries: entries.into_iter().map(EntryDto::from).collect(),
        pagination: Pagination::new(page, limit, total),
    }))
}

/// GET /api/v1/entries/{id}
///
/// Get a single entry by ID
pub async fn get_entry(
    State(state): State<AppState>,
    _caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<EntryResponse>> {
    let entry_id = Uuid::parse_str(&id)?;

    let repo = EntryRepository::new(state.pool.clone());
    let entry = repo
        .find_by_id(entry_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Entry {} not found", id)))?;

    Ok(Json(EntryResponse {
        entry: entry.into(),
    }))
}

/// GET /api/v1/entries/stats
///
/// SQL-side aggregate summary under the common filter set
pub async fn entry_stats(
    State(state): State<AppState>,
    _caller: Caller,
    Query(query): Query<ListEntriesQuery>,
) -> ApiResult<Json<StatsResponse>> {
    let filter = build_filter(&query, Utc::now().date_naive())?;

    let repo = EntryRepository::new(state.pool.clone());
    let stats = repo.stats(&filter).await?;

    Ok(Json(StatsResponse::from(stats)))
}

/// GET /api/v1/entries/analytics
///
/// Full in-process rollup of the filtered entry set
pub async fn entry_analytics(
    State(state): State<AppState>,
    _caller: Caller,
    Query(query): Query<ListEntriesQuery>,
) -> ApiResult<Json<AnalyticsReport>> {
    let today = Utc::now().date_naive();
    let filter = build_filter(&query, today)?;

    let repo = EntryRepository::new(state.pool.clone());
    let entries = repo.list_all(&filter).await?;

    Ok(Json(rollup(&entries, today)))
}

// =============================================================================
// Helpers
// =============================================================================

/// Which groups a freshly created entry carries, by attribution.
fn applied_groups(entry: &Entry) -> Vec<String> {
    let mut applied = vec![FieldGroup::Demographic.as_str().to_string()];
    if entry.health_created_by.is_some() {
        applied.push(FieldGroup::Health.as_str().to_string());
    }
    if entry.medical_created_by.is_some() {
        applied.push(FieldGroup::Medical.as_str().to_string());
    }
    applied
}

const MAX_FILTER_AGE: u32 = 150;

/// Translate query parameters into a repository filter. Age bounds become a
/// date-of-birth window: at least `min_age` years old means born on or
/// before `today - min_age` years, and at most `max_age` years old means
/// born strictly after `today - (max_age + 1)` years.
fn build_filter(query: &ListEntriesQuery, today: NaiveDate) -> Result<EntryFilter, ApiError> {
    let gender = match query.gender.as_deref() {
        Some(s) => Some(
            Gender::from_str(s)
                .map_err(|_| ApiError::validation_field("Gender must be male or female", "gender"))?,
        ),
        None => None,
    };

    let max_birth_date = match query.min_age {
        Some(age) => Some(years_before(today, age.min(MAX_FILTER_AGE))),
        None => None,
    };
    let min_birth_date = match query.max_age {
        Some(age) => years_before(today, age.min(MAX_FILTER_AGE) + 1).checked_add_days(Days::new(1)),
        None => None,
    };

    Ok(EntryFilter {
        gender,
        diagnosis: query.diagnosis.clone(),
        treatment: query.treatment.clone(),
        min_weight: query.min_weight,
        max_weight: query.max_weight,
        min_birth_date,
        max_birth_date,
        search: query.search.clone(),
    })
}

fn years_before(today: NaiveDate, years: u32) -> NaiveDate {
    // Cannot underflow the calendar for clamped ages.
    today
        .checked_sub_months(Months::new(12 * years))
        .unwrap_or(NaiveDate::MIN)
}
