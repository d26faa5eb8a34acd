use ramadhan_backend::db::repository;
use ramadhan_backend::models::{NewInquiryRequest, PrayerStatus, UpsertRecordRequest};
use sqlx::SqlitePool;

async fn setup_pool() -> SqlitePool {
    let db = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    sqlx::query(
        r#"
        CREATE TABLE records (
            student_name TEXT NOT NULL,
            day INTEGER NOT NULL,
            fajr TEXT,
            dhuhr TEXT,
            asr TEXT,
            maghrib TEXT,
            isha TEXT,
            tarawih TEXT,
            duha INTEGER NOT NULL DEFAULT 0,
            charity INTEGER NOT NULL DEFAULT 0,
            dhikr INTEGER NOT NULL DEFAULT 0,
            itikaf INTEGER NOT NULL DEFAULT 0,
            lecture_speaker TEXT,
            lecture_topic TEXT,
            lecture_summary TEXT,
            quran_pages INTEGER NOT NULL DEFAULT 0,
            total_exp INTEGER NOT NULL DEFAULT 0,
            updated_at TEXT NOT NULL,
            sync_state TEXT NOT NULL CHECK(sync_state IN ('pending', 'synced')) DEFAULT 'pending',
            last_synced_at TEXT,
            PRIMARY KEY (student_name, day)
        )
        "#,
    )
    .execute(&db)
    .await
    .expect("Failed to create records table");

    sqlx::query(
        r#"
        CREATE TABLE inquiries (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            subject TEXT NOT NULL,
            message TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(&db)
    .await
    .expect("Failed to create inquiries table");

    db
}

#[tokio::test]
async fn upsert_stores_a_recomputed_score() {
    let db = setup_pool().await;

    let req = UpsertRecordRequest {
        student_name: "Aisyah Putri".to_string(),
        day: 3,
        fajr: Some(PrayerStatus::Congregation),
        quran_pages: 2,
        ..Default::default()
    };

    let record = repository::upsert_record(&db, req)
        .await
        .expect("Failed to upsert record");

    // 15 for the congregation prayer, 20 for two pages.
    assert_eq!(record.total_exp, 35);
    assert_eq!(record.sync_state, "pending");
    assert!(record.last_synced_at.is_none());
    assert!(!record.updated_at.is_empty());
}

#[tokio::test]
async fn second_write_replaces_the_first_without_merging() {
    let db = setup_pool().await;

    let first = UpsertRecordRequest {
        student_name: "Budi Santoso".to_string(),
        day: 5,
        charity: true,
        quran_pages: 3,
        lecture_summary: Some("Notes on patience".to_string()),
        ..Default::default()
    };
    repository::upsert_record(&db, first)
        .await
        .expect("Failed to insert first write");

    let second = UpsertRecordRequest {
        student_name: "Budi Santoso".to_string(),
        day: 5,
        dhuhr: Some(PrayerStatus::Individual),
        ..Default::default()
    };
    repository::upsert_record(&db, second)
        .await
        .expect("Failed to upsert second write");

    let stored = repository::find_record(&db, "Budi Santoso", 5)
        .await
        .expect("Failed to fetch record")
        .expect("Record missing after upsert");

    // Only the second write's fields survive.
    assert!(!stored.charity);
    assert_eq!(stored.quran_pages, 0);
    assert!(stored.lecture_summary.is_none());
    assert_eq!(stored.dhuhr, Some(PrayerStatus::Individual));
    assert_eq!(stored.total_exp, 10);

    let all = repository::fetch_records(&db, None, None)
        .await
        .expect("Failed to fetch records");
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn fetch_records_filters_by_student_and_day() {
    let db = setup_pool().await;

    for (student, day) in [("Aisyah Putri", 1), ("Aisyah Putri", 2), ("Budi Santoso", 1)] {
        let req = UpsertRecordRequest {
            student_name: student.to_string(),
            day,
            dhikr: true,
            ..Default::default()
        };
        repository::upsert_record(&db, req)
            .await
            .expect("Failed to upsert record");
    }

    let by_student = repository::fetch_records(&db, Some("Aisyah Putri"), None)
        .await
        .expect("Failed to fetch by student");
    assert_eq!(by_student.len(), 2);

    let by_day = repository::fetch_records(&db, None, Some(1))
        .await
        .expect("Failed to fetch by day");
    assert_eq!(by_day.len(), 2);

    let by_both = repository::fetch_records(&db, Some("Budi Santoso"), Some(1))
        .await
        .expect("Failed to fetch by student and day");
    assert_eq!(by_both.len(), 1);
    assert_eq!(by_both[0].student_name, "Budi Santoso");

    let missing = repository::fetch_records(&db, Some("Budi Santoso"), Some(2))
        .await
        .expect("Failed to fetch missing combination");
    assert!(missing.is_empty());
}

#[tokio::test]
async fn pending_records_are_tracked_until_marked_synced() {
    let db = setup_pool().await;

    let req = UpsertRecordRequest {
        student_name: "Dewi Lestari".to_string(),
        day: 7,
        itikaf: true,
        ..Default::default()
    };
    repository::upsert_record(&db, req)
        .await
        .expect("Failed to upsert record");

    let pending = repository::fetch_pending_records(&db)
        .await
        .expect("Failed to fetch pending records");
    assert_eq!(pending.len(), 1);

    let marked = repository::mark_record_synced(
        &db,
        "Dewi Lestari",
        7,
        "2026-02-25T12:00:00+00:00",
    )
    .await
    .expect("Failed to mark record synced");
    assert!(marked);

    let pending = repository::fetch_pending_records(&db)
        .await
        .expect("Failed to fetch pending records");
    assert!(pending.is_empty());

    // A fresh write flips the record back to pending.
    let again = UpsertRecordRequest {
        student_name: "Dewi Lestari".to_string(),
        day: 7,
        charity: true,
        ..Default::default()
    };
    repository::upsert_record(&db, again)
        .await
        .expect("Failed to upsert record again");

    let pending = repository::fetch_pending_records(&db)
        .await
        .expect("Failed to fetch pending records");
    assert_eq!(pending.len(), 1);
}

#[tokio::test]
async fn inquiries_are_stored_with_generated_ids() {
    let db = setup_pool().await;

    let inquiry = repository::insert_inquiry(
        &db,
        NewInquiryRequest {
            name: "Pak Ahmad".to_string(),
            email: "ahmad@example.com".to_string(),
            subject: "Leaderboard question".to_string(),
            message: "How are points calculated?".to_string(),
        },
    )
    .await
    .expect("Failed to insert inquiry");

    assert!(!inquiry.id.is_empty());
    assert!(!inquiry.created_at.is_empty());
}
