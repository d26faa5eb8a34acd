use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// How a prayer was performed. Unset means it was not performed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PrayerStatus {
    Congregation,
    Individual,
}

impl PrayerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerStatus::Congregation => "congregation",
            PrayerStatus::Individual => "individual",
        }
    }
}

/// One journal entry per (student_name, day). The pair is unique; a later
/// write for the same pair replaces the earlier one entirely.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyRecord {
    pub student_name: String,
    pub day: i64,
    pub fajr: Option<PrayerStatus>,
    pub dhuhr: Option<PrayerStatus>,
    pub asr: Option<PrayerStatus>,
    pub maghrib: Option<PrayerStatus>,
    pub isha: Option<PrayerStatus>,
    pub tarawih: Option<PrayerStatus>,
    pub duha: bool,
    pub charity: bool,
    pub dhikr: bool,
    pub itikaf: bool,
    pub lecture_speaker: Option<String>,
    pub lecture_topic: Option<String>,
    pub lecture_summary: Option<String>,
    pub quran_pages: i64,
    /// Derived cache of the scoring function; recomputed on every write.
    pub total_exp: i64,
    pub updated_at: String,
    pub sync_state: String,
    pub last_synced_at: Option<String>,
}

/// Client-submitted entry. Every activity field is optional so a partial
/// submission scores as if the missing fields are in their zero state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertRecordRequest {
    pub student_name: String,
    pub day: i64,
    #[serde(default)]
    pub fajr: Option<PrayerStatus>,
    #[serde(default)]
    pub dhuhr: Option<PrayerStatus>,
    #[serde(default)]
    pub asr: Option<PrayerStatus>,
    #[serde(default)]
    pub maghrib: Option<PrayerStatus>,
    #[serde(default)]
    pub isha: Option<PrayerStatus>,
    #[serde(default)]
    pub tarawih: Option<PrayerStatus>,
    #[serde(default)]
    pub duha: bool,
    #[serde(default)]
    pub charity: bool,
    #[serde(default)]
    pub dhikr: bool,
    #[serde(default)]
    pub itikaf: bool,
    #[serde(default)]
    pub lecture_speaker: Option<String>,
    #[serde(default)]
    pub lecture_topic: Option<String>,
    #[serde(default)]
    pub lecture_summary: Option<String>,
    #[serde(default)]
    pub quran_pages: i64,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRank {
    pub name: String,
    pub exp: i64,
}
