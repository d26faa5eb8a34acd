use axum::Json;
use axum::extract::{Path, Query};
use axum::http::{Method, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::db::repository;
use crate::error::AppError;
use crate::leaderboard;
use crate::models::*;
use crate::services::{SyncService, SyncStats};
use crate::state::AppState;

#[derive(Deserialize)]
struct RecordQueryParams {
    #[serde(default)]
    student_name: Option<String>,
    #[serde(default)]
    day: Option<i64>,
}

#[derive(Serialize)]
struct CalendarToday {
    day: i64,
    date: NaiveDate,
    label: String,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/records", get(list_records).post(upsert_record))
        .route("/records/{student_name}/{day}", get(get_record))
        .route("/leaderboard", get(get_leaderboard))
        .route("/calendar/today", get(calendar_today))
        .route("/export.csv", get(export_csv))
        .route("/inquiries", post(create_inquiry))
        .route("/sync", post(sync_now))
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<RecordQueryParams>,
) -> Result<Json<Vec<DailyRecord>>, AppError> {
    let records =
        repository::fetch_records(&state.db, params.student_name.as_deref(), params.day).await?;
    Ok(Json(records))
}

async fn get_record(
    State(state): State<AppState>,
    Path((student_name, day)): Path<(String, i64)>,
) -> Result<Json<DailyRecord>, AppError> {
    let record = repository::find_record(&state.db, &student_name, day)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(record))
}

async fn upsert_record(
    State(state): State<AppState>,
    Json(req): Json<UpsertRecordRequest>,
) -> Result<Json<DailyRecord>, AppError> {
    if !(1..=30).contains(&req.day) {
        return Err(AppError::BadRequest(
            "day must be between 1 and 30".to_string(),
        ));
    }
    if req.student_name.trim().is_empty() {
        return Err(AppError::BadRequest("student_name is required".to_string()));
    }

    let record = repository::upsert_record(&state.db, req).await?;

    // Fire-and-forget mirror push; the scheduler retries anything that fails.
    let sheets = state.sheets.clone();
    let db = state.db.clone();
    let pushed = record.clone();
    tokio::spawn(async move {
        if let Err(e) = sheets.push_record(&pushed).await {
            warn!(
                "Mirror push failed for {} day {}: {}",
                pushed.student_name, pushed.day, e
            );
            return;
        }
        let now = chrono::Utc::now().to_rfc3339();
        if let Err(e) =
            repository::mark_record_synced(&db, &pushed.student_name, pushed.day, &now).await
        {
            warn!(
                "Failed to mark record synced for {} day {}: {}",
                pushed.student_name, pushed.day, e
            );
        }
    });

    Ok(Json(record))
}

/// The leaderboard is a presentation surface: when the store is unreachable
/// it degrades to a roster of zero scores instead of propagating the fault.
async fn get_leaderboard(State(state): State<AppState>) -> Json<Vec<StudentRank>> {
    let records = match repository::fetch_records(&state.db, None, None).await {
        Ok(records) => records,
        Err(e) => {
            warn!("Leaderboard degraded, store unavailable: {}", e);
            Vec::new()
        }
    };

    Json(leaderboard::rank_students(&records, &state.roster))
}

async fn calendar_today(State(state): State<AppState>) -> Json<CalendarToday> {
    let today = Local::now().date_naive();
    Json(CalendarToday {
        day: state.calendar.day_for(today),
        date: today,
        label: state.calendar.label(today),
    })
}

async fn export_csv(State(state): State<AppState>) -> Result<Response, AppError> {
    let records = repository::fetch_records(&state.db, None, None).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "student_name",
            "day",
            "fajr",
            "dhuhr",
            "asr",
            "maghrib",
            "isha",
            "tarawih",
            "duha",
            "charity",
            "dhikr",
            "itikaf",
            "lecture_speaker",
            "lecture_topic",
            "lecture_summary",
            "quran_pages",
            "total_exp",
            "updated_at",
        ])
        .map_err(|_| AppError::InternalServerError)?;

    for record in &records {
        writer
            .write_record([
                record.student_name.clone(),
                record.day.to_string(),
                prayer_field(record.fajr),
                prayer_field(record.dhuhr),
                prayer_field(record.asr),
                prayer_field(record.maghrib),
                prayer_field(record.isha),
                prayer_field(record.tarawih),
                record.duha.to_string(),
                record.charity.to_string(),
                record.dhikr.to_string(),
                record.itikaf.to_string(),
                record.lecture_speaker.clone().unwrap_or_default(),
                record.lecture_topic.clone().unwrap_or_default(),
                record.lecture_summary.clone().unwrap_or_default(),
                record.quran_pages.to_string(),
                record.total_exp.to_string(),
                record.updated_at.clone(),
            ])
            .map_err(|_| AppError::InternalServerError)?;
    }

    let data = writer
        .into_inner()
        .map_err(|_| AppError::InternalServerError)?;
    let body = String::from_utf8(data).map_err(|_| AppError::InternalServerError)?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"jurnal_ramadhan_data.csv\"",
        ),
    ];
    Ok((headers, body).into_response())
}

fn prayer_field(status: Option<PrayerStatus>) -> String {
    status.map(|s| s.as_str().to_string()).unwrap_or_default()
}

async fn create_inquiry(
    State(state): State<AppState>,
    Json(req): Json<NewInquiryRequest>,
) -> Result<(StatusCode, Json<Inquiry>), AppError> {
    let inquiry = repository::insert_inquiry(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

async fn sync_now(State(state): State<AppState>) -> Result<Json<SyncStats>, AppError> {
    let service = SyncService::new(state.db.clone(), state.sheets.clone());
    let stats = service.push_pending().await?;
    Ok(Json(stats))
}
