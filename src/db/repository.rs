use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{DailyRecord, Inquiry, NewInquiryRequest, UpsertRecordRequest};
use crate::scoring;

const RECORD_COLUMNS: &str = "student_name, day, fajr, dhuhr, asr, maghrib, isha, tarawih, \
    duha, charity, dhikr, itikaf, lecture_speaker, lecture_topic, lecture_summary, \
    quran_pages, total_exp, updated_at, sync_state, last_synced_at";

pub async fn fetch_records(
    db: &SqlitePool,
    student_name: Option<&str>,
    day: Option<i64>,
) -> Result<Vec<DailyRecord>, sqlx::Error> {
    let mut sql = format!("SELECT {RECORD_COLUMNS} FROM records");
    match (student_name, day) {
        (Some(_), Some(_)) => sql.push_str(" WHERE student_name = ? AND day = ?"),
        (Some(_), None) => sql.push_str(" WHERE student_name = ?"),
        (None, Some(_)) => sql.push_str(" WHERE day = ?"),
        (None, None) => {}
    }
    sql.push_str(" ORDER BY day, student_name");

    let mut query = sqlx::query_as::<_, DailyRecord>(&sql);
    if let Some(student_name) = student_name {
        query = query.bind(student_name.to_string());
    }
    if let Some(day) = day {
        query = query.bind(day);
    }

    query.fetch_all(db).await
}

pub async fn find_record(
    db: &SqlitePool,
    student_name: &str,
    day: i64,
) -> Result<Option<DailyRecord>, sqlx::Error> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM records WHERE student_name = ? AND day = ?");
    sqlx::query_as::<_, DailyRecord>(&sql)
        .bind(student_name)
        .bind(day)
        .fetch_optional(db)
        .await
}

/// Last-write-wins upsert on (student_name, day). The stored total_exp is
/// always recomputed from the submitted fields, and the record goes back to
/// 'pending' so the mirror picks it up again.
pub async fn upsert_record(
    db: &SqlitePool,
    req: UpsertRecordRequest,
) -> Result<DailyRecord, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let mut record = DailyRecord {
        student_name: req.student_name,
        day: req.day,
        fajr: req.fajr,
        dhuhr: req.dhuhr,
        asr: req.asr,
        maghrib: req.maghrib,
        isha: req.isha,
        tarawih: req.tarawih,
        duha: req.duha,
        charity: req.charity,
        dhikr: req.dhikr,
        itikaf: req.itikaf,
        lecture_speaker: req.lecture_speaker,
        lecture_topic: req.lecture_topic,
        lecture_summary: req.lecture_summary,
        quran_pages: req.quran_pages,
        total_exp: 0,
        updated_at: now,
        sync_state: "pending".to_string(),
        last_synced_at: None,
    };
    record.total_exp = scoring::compute_score(&record);

    match find_record(db, &record.student_name, record.day).await? {
        Some(_) => {
            // Replace every field: no merge with the previous write.
            sqlx::query(
                "UPDATE records SET fajr = ?, dhuhr = ?, asr = ?, maghrib = ?, isha = ?, tarawih = ?, duha = ?, charity = ?, dhikr = ?, itikaf = ?, lecture_speaker = ?, lecture_topic = ?, lecture_summary = ?, quran_pages = ?, total_exp = ?, updated_at = ?, sync_state = ?, last_synced_at = ? WHERE student_name = ? AND day = ?"
            )
            .bind(record.fajr)
            .bind(record.dhuhr)
            .bind(record.asr)
            .bind(record.maghrib)
            .bind(record.isha)
            .bind(record.tarawih)
            .bind(record.duha)
            .bind(record.charity)
            .bind(record.dhikr)
            .bind(record.itikaf)
            .bind(&record.lecture_speaker)
            .bind(&record.lecture_topic)
            .bind(&record.lecture_summary)
            .bind(record.quran_pages)
            .bind(record.total_exp)
            .bind(&record.updated_at)
            .bind(&record.sync_state)
            .bind(&record.last_synced_at)
            .bind(&record.student_name)
            .bind(record.day)
            .execute(db)
            .await?;
        }
        None => {
            sqlx::query(
                "INSERT INTO records (student_name, day, fajr, dhuhr, asr, maghrib, isha, tarawih, duha, charity, dhikr, itikaf, lecture_speaker, lecture_topic, lecture_summary, quran_pages, total_exp, updated_at, sync_state, last_synced_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            )
            .bind(&record.student_name)
            .bind(record.day)
            .bind(record.fajr)
            .bind(record.dhuhr)
            .bind(record.asr)
            .bind(record.maghrib)
            .bind(record.isha)
            .bind(record.tarawih)
            .bind(record.duha)
            .bind(record.charity)
            .bind(record.dhikr)
            .bind(record.itikaf)
            .bind(&record.lecture_speaker)
            .bind(&record.lecture_topic)
            .bind(&record.lecture_summary)
            .bind(record.quran_pages)
            .bind(record.total_exp)
            .bind(&record.updated_at)
            .bind(&record.sync_state)
            .bind(&record.last_synced_at)
            .execute(db)
            .await?;
        }
    }

    find_record(db, &record.student_name, record.day)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

pub async fn fetch_pending_records(db: &SqlitePool) -> Result<Vec<DailyRecord>, sqlx::Error> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM records WHERE sync_state != 'synced' ORDER BY day, student_name"
    );
    sqlx::query_as::<_, DailyRecord>(&sql).fetch_all(db).await
}

pub async fn mark_record_synced(
    db: &SqlitePool,
    student_name: &str,
    day: i64,
    synced_at: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE records SET sync_state = 'synced', last_synced_at = ? WHERE student_name = ? AND day = ?",
    )
    .bind(synced_at)
    .bind(student_name)
    .bind(day)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn insert_inquiry(
    db: &SqlitePool,
    req: NewInquiryRequest,
) -> Result<Inquiry, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO inquiries (id, name, email, subject, message, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&req.name)
    .bind(&req.email)
    .bind(&req.subject)
    .bind(&req.message)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(Inquiry {
        id,
        name: req.name,
        email: req.email,
        subject: req.subject,
        message: req.message,
        created_at: now,
    })
}
