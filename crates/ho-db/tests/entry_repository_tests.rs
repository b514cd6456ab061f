mod common;

use common::{create_full_test_entry, create_test_entry, create_test_pool, create_test_user};

use ho_core::{Gender, Role};
use ho_db::{EntryFilter, EntryRepository};

use chrono::{Duration, NaiveDate};
use googletest::prelude::*;
use uuid::Uuid;

#[tokio::test]
async fn given_valid_entry_when_created_then_can_be_found_by_id() {
    // Given: A test database with a user
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    create_test_user(&pool, user_id, Role::Admin).await;

    let entry = create_test_entry(user_id);
    let repo = EntryRepository::new(pool.clone());

    // When: Creating the entry
    repo.create(&entry).await.unwrap();

    // Then: Finding by ID returns an identical entry
    let result = repo.find_by_id(entry.id).await.unwrap();

    assert_that!(result, some(anything()));
    let found = result.unwrap();
    assert_that!(found, eq(&entry));
}

#[tokio::test]
async fn given_entry_with_all_groups_when_round_tripped_then_attributions_survive() {
    // Given: A fully populated entry
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    create_test_user(&pool, user_id, Role::Admin).await;

    let entry = create_full_test_entry(user_id);
    let repo = EntryRepository::new(pool.clone());

    // When: Creating and re-reading it
    repo.create(&entry).await.unwrap();
    let found = repo.find_by_id(entry.id).await.unwrap().unwrap();

    // Then: Group values and attributions come back intact
    assert_that!(found.bp.as_deref(), some(eq("120/80")));
    assert_that!(found.health_created_by, some(eq(user_id)));
    assert_that!(found.diagnosis.as_deref(), some(eq("Malaria")));
    assert_that!(found.medical_created_by, some(eq(user_id)));
}

#[tokio::test]
async fn given_empty_database_when_finding_nonexistent_id_then_returns_none() {
    // Given: An empty database
    let pool = create_test_pool().await;
    let repo = EntryRepository::new(pool);

    // When: Finding an entry that doesn't exist
    let result = repo.find_by_id(Uuid::new_v4()).await.unwrap();

    // Then: Returns None
    assert_that!(result, none());
}

#[tokio::test]
async fn given_updated_entry_when_re_read_then_new_values_persisted() {
    // Given: A stored demographics-only entry
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    create_test_user(&pool, user_id, Role::Nurse).await;

    let mut entry = create_test_entry(user_id);
    let repo = EntryRepository::new(pool.clone());
    repo.create(&entry).await.unwrap();

    // When: Populating the health group and updating
    entry.bp = Some("130/85".to_string());
    entry.temp = Some(37.2);
    entry.weight = Some(70.0);
    entry.health_created_by = Some(user_id);
    entry.updated_at += Duration::seconds(5);
    repo.update(&entry).await.unwrap();

    // Then: Re-reading shows the new values
    let found = repo.find_by_id(entry.id).await.unwrap().unwrap();
    assert_that!(found.bp.as_deref(), some(eq("130/85")));
    assert_that!(found.health_created_by, some(eq(user_id)));
    assert_that!(found.updated_at, eq(entry.updated_at));
}

#[tokio::test]
async fn given_several_entries_when_listed_then_newest_first_and_paged() {
    // Given: Three entries created at increasing times
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    create_test_user(&pool, user_id, Role::Admin).await;

    let repo = EntryRepository::new(pool.clone());
    let mut ids = Vec::new();
    for i in 0..3 {
        let mut entry = create_test_entry(user_id);
        entry.created_at += Duration::seconds(i);
        entry.updated_at = entry.created_at;
        repo.create(&entry).await.unwrap();
        ids.push(entry.id);
    }

    // When: Listing the first page of two
    let filter = EntryFilter::default();
    let page = repo.list(&filter, 2, 0).await.unwrap();

    // Then: Newest entry comes first and the page holds two rows
    assert_that!(page.len(), eq(2));
    assert_that!(page[0].id, eq(ids[2]));
    assert_that!(repo.count(&filter).await.unwrap(), eq(3));

    // And: The second page holds the remaining entry
    let rest = repo.list(&filter, 2, 2).await.unwrap();
    assert_that!(rest.len(), eq(1));
    assert_that!(rest[0].id, eq(ids[0]));
}

#[tokio::test]
async fn given_mixed_entries_when_filtered_by_gender_then_only_matches_return() {
    // Given: One female and one male entry
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    create_test_user(&pool, user_id, Role::Admin).await;

    let repo = EntryRepository::new(pool.clone());
    let female = create_test_entry(user_id);
    let mut male = create_test_entry(user_id);
    male.gender = Gender::Male;
    repo.create(&female).await.unwrap();
    repo.create(&male).await.unwrap();

    // When: Filtering on male
    let filter = EntryFilter {
        gender: Some(Gender::Male),
        ..Default::default()
    };
    let result = repo.list(&filter, 50, 0).await.unwrap();

    // Then: Only the male entry returns
    assert_that!(result.len(), eq(1));
    assert_that!(result[0].id, eq(male.id));
}

#[tokio::test]
async fn given_entries_when_filtered_by_diagnosis_substring_then_matches_return() {
    // Given: Two diagnosed entries and one without
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    create_test_user(&pool, user_id, Role::Admin).await;

    let repo = EntryRepository::new(pool.clone());
    let mut malaria = create_test_entry(user_id);
    malaria.diagnosis = Some("Severe Malaria".to_string());
    let mut typhoid = create_test_entry(user_id);
    typhoid.diagnosis = Some("Typhoid".to_string());
    let blank = create_test_entry(user_id);
    repo.create(&malaria).await.unwrap();
    repo.create(&typhoid).await.unwrap();
    repo.create(&blank).await.unwrap();

    // When: Filtering on a diagnosis substring
    let filter = EntryFilter {
        diagnosis: Some("malaria".to_string()),
        ..Default::default()
    };
    let result = repo.list(&filter, 50, 0).await.unwrap();

    // Then: Only the malaria entry matches, case-insensitively
    assert_that!(result.len(), eq(1));
    assert_that!(result[0].id, eq(malaria.id));
}

#[tokio::test]
async fn given_entries_when_filtered_by_birth_date_window_then_window_applies() {
    // Given: Entries born in 1980, 1990 and 2000
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    create_test_user(&pool, user_id, Role::Admin).await;

    let repo = EntryRepository::new(pool.clone());
    let mut ids = Vec::new();
    for year in [1980, 1990, 2000] {
        let mut entry = create_test_entry(user_id);
        entry.date_of_birth = NaiveDate::from_ymd_opt(year, 6, 1).unwrap();
        repo.create(&entry).await.unwrap();
        ids.push(entry.id);
    }

    // When: Restricting to births between 1985 and 1995
    let filter = EntryFilter {
        min_birth_date: NaiveDate::from_ymd_opt(1985, 1, 1),
        max_birth_date: NaiveDate::from_ymd_opt(1995, 12, 31),
        ..Default::default()
    };
    let result = repo.list(&filter, 50, 0).await.unwrap();

    // Then: Only the 1990 entry falls inside the window
    assert_that!(result.len(), eq(1));
    assert_that!(result[0].id, eq(ids[1]));
}

#[tokio::test]
async fn given_entries_when_searched_by_name_then_any_name_field_matches() {
    // Given: Entries with distinct surnames
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    create_test_user(&pool, user_id, Role::Admin).await;

    let repo = EntryRepository::new(pool.clone());
    let mut okafor = create_test_entry(user_id);
    okafor.surname = "Okafor".to_string();
    let mut adeyemi = create_test_entry(user_id);
    adeyemi.surname = "Adeyemi".to_string();
    repo.create(&okafor).await.unwrap();
    repo.create(&adeyemi).await.unwrap();

    // When: Searching for part of a surname
    let filter = EntryFilter {
        search: Some("adey".to_string()),
        ..Default::default()
    };
    let result = repo.list(&filter, 50, 0).await.unwrap();

    // Then: Only the matching entry returns
    assert_that!(result.len(), eq(1));
    assert_that!(result[0].id, eq(adeyemi.id));
}

#[tokio::test]
async fn given_weighted_entries_when_stats_computed_then_aggregates_match() {
    // Given: Two weighted, diagnosed entries and one bare entry
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    create_test_user(&pool, user_id, Role::Admin).await;

    let repo = EntryRepository::new(pool.clone());
    let mut a = create_test_entry(user_id);
    a.weight = Some(60.0);
    a.diagnosis = Some("Malaria".to_string());
    let mut b = create_test_entry(user_id);
    b.gender = Gender::Male;
    b.weight = Some(80.0);
    b.diagnosis = Some("Malaria".to_string());
    let c = create_test_entry(user_id);
    repo.create(&a).await.unwrap();
    repo.create(&b).await.unwrap();
    repo.create(&c).await.unwrap();

    // When: Computing the aggregate summary
    let stats = repo.stats(&EntryFilter::default()).await.unwrap();

    // Then: Counts, groupings and averages reflect the data
    assert_that!(stats.total, eq(3));
    assert_that!(stats.average_weight, some(approx_eq(70.0)));
    assert_that!(stats.average_temp, none());

    let female = stats.gender.iter().find(|g| g.label == "female").unwrap();
    assert_that!(female.count, eq(2));

    // NULL diagnoses stay out of the diagnosis grouping
    assert_that!(stats.diagnosis.len(), eq(1));
    assert_that!(stats.diagnosis[0].label, eq("Malaria"));
    assert_that!(stats.diagnosis[0].count, eq(2));
}

#[tokio::test]
async fn given_filter_when_stats_computed_then_filter_applies_to_aggregates() {
    // Given: Entries of both genders with weights
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    create_test_user(&pool, user_id, Role::Admin).await;

    let repo = EntryRepository::new(pool.clone());
    let mut a = create_test_entry(user_id);
    a.weight = Some(50.0);
    let mut b = create_test_entry(user_id);
    b.gender = Gender::Male;
    b.weight = Some(90.0);
    repo.create(&a).await.unwrap();
    repo.create(&b).await.unwrap();

    // When: Computing stats restricted to females
    let filter = EntryFilter {
        gender: Some(Gender::Female),
        ..Default::default()
    };
    let stats = repo.stats(&filter).await.unwrap();

    // Then: Only the female entry contributes
    assert_that!(stats.total, eq(1));
    assert_that!(stats.average_weight, some(approx_eq(50.0)));
}

#[tokio::test]
async fn given_filter_when_listing_all_then_every_match_returns() {
    // Given: Five entries
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    create_test_user(&pool, user_id, Role::Admin).await;

    let repo = EntryRepository::new(pool.clone());
    for _ in 0..5 {
        repo.create(&create_test_entry(user_id)).await.unwrap();
    }

    // When: Fetching all without pagination
    let all = repo.list_all(&EntryFilter::default()).await.unwrap();

    // Then: Every entry comes back
    assert_that!(all.len(), eq(5));
}
