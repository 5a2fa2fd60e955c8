//! PostgreSQL storage integration tests
//!
//! These run against the database named by `DATABASE_URL` and are skipped
//! when it is unset. Migrations are applied on connect.

use std::sync::Arc;

use chrono::Utc;
use pretty_assertions::assert_eq;

use abstract_submissions::backend::server::init::connect_database;
use abstract_submissions::backend::storage::{
    NewSubmission, PgSequenceAllocator, PgSubmissionStore, SequenceAllocator, SubmissionStore,
};
use abstract_submissions::shared::{AbstractType, SubmissionFields, SubmissionPatch};

async fn pool() -> Option<sqlx::PgPool> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set; skipping PostgreSQL tests");
            return None;
        }
    };
    Some(connect_database(&url).await.expect("Failed to connect to test database"))
}

/// Counter name private to one test run
fn sequence_name(test: &str) -> String {
    format!("test_{}_{}", test, Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

fn fields() -> SubmissionFields {
    SubmissionFields {
        submitter_name: "Grace Hopper".into(),
        submitter_email: "grace@example.com".into(),
        abstract_title: "Compilers for Everyone".into(),
        abstract_type: AbstractType::TechnicalPaper,
        theme: "Languages".into(),
        company: "Navy".into(),
        discipline: "Computer Science".into(),
        author_names: "Grace Hopper".into(),
        abstract_content: "A-0 and beyond.".into(),
    }
}

#[tokio::test]
async fn test_sequence_starts_at_one_and_increments() {
    let Some(pool) = pool().await else { return };
    let allocator = PgSequenceAllocator::new(pool);
    let name = sequence_name("increments");

    assert_eq!(allocator.next_value(&name).await.unwrap(), 1);
    assert_eq!(allocator.next_value(&name).await.unwrap(), 2);
}

#[tokio::test]
async fn test_concurrent_allocation_is_distinct() {
    let Some(pool) = pool().await else { return };
    let allocator = Arc::new(PgSequenceAllocator::new(pool));
    let name = sequence_name("concurrent");

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let allocator = allocator.clone();
            let name = name.clone();
            tokio::spawn(async move { allocator.next_value(&name).await.unwrap() })
        })
        .collect();

    let mut values = Vec::new();
    for handle in handles {
        values.push(handle.await.unwrap());
    }
    values.sort();
    assert_eq!(values, (1..=20).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_create_find_and_update() {
    let Some(pool) = pool().await else { return };
    let allocator = PgSequenceAllocator::new(pool.clone());
    let store = PgSubmissionStore::new(pool);

    // Negative IDs keep test rows clear of the live sequence
    let unique_id = -allocator.next_value("test_submissions").await.unwrap();
    let created = store
        .create(NewSubmission {
            unique_id,
            fields: fields(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    assert_eq!(created.unique_id, unique_id);

    let found = store.find_by_unique_id(unique_id).await.unwrap().unwrap();
    assert_eq!(found.fields, fields());

    let patch = SubmissionPatch {
        abstract_title: Some("Compilers for Everyone, Revised".into()),
        ..Default::default()
    };
    let updated = store
        .update_by_unique_id(unique_id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.fields.abstract_title, "Compilers for Everyone, Revised");
    assert_eq!(updated.fields.theme, "Languages");
    assert_eq!(updated.unique_id, unique_id);
    assert_eq!(
        updated.created_at.timestamp_micros(),
        created.created_at.timestamp_micros()
    );
}

#[tokio::test]
async fn test_missing_rows() {
    let Some(pool) = pool().await else { return };
    let store = PgSubmissionStore::new(pool);

    assert!(store.find_by_unique_id(i64::MIN).await.unwrap().is_none());
    let patch = SubmissionPatch {
        theme: Some("Nothing".into()),
        ..Default::default()
    };
    assert!(store
        .update_by_unique_id(i64::MIN, &patch)
        .await
        .unwrap()
        .is_none());
}
