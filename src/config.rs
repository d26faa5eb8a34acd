use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::AppError;

/// Runtime configuration, read once at startup. The anchor date and Hijri
/// year drive the observance-period calendar; everything else is wiring.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub anchor: NaiveDate,
    pub hijri_year: i64,
    pub roster_path: Option<PathBuf>,
    pub sheets_webhook_url: Option<String>,
    pub sync_interval_secs: u64,
}

impl Config {
    pub fn new_from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://ramadhan.db".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| AppError::BadRequest("PORT must be a number".to_string()))?;

        let anchor_str =
            env::var("RAMADHAN_START").unwrap_or_else(|_| "2026-02-19".to_string());
        let anchor = NaiveDate::parse_from_str(&anchor_str, "%Y-%m-%d").map_err(|_| {
            AppError::BadRequest(format!(
                "RAMADHAN_START must be YYYY-MM-DD, got {anchor_str}"
            ))
        })?;

        let hijri_year = env::var("HIJRI_YEAR")
            .unwrap_or_else(|_| "1447".to_string())
            .parse::<i64>()
            .map_err(|_| AppError::BadRequest("HIJRI_YEAR must be a number".to_string()))?;

        let roster_path = env::var("ROSTER_PATH").ok().map(PathBuf::from);

        let sheets_webhook_url = env::var("SHEETS_WEBHOOK_URL")
            .ok()
            .filter(|url| !url.is_empty());

        let sync_interval_secs = env::var("SYNC_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .parse::<u64>()
            .map_err(|_| {
                AppError::BadRequest("SYNC_INTERVAL_SECS must be a number".to_string())
            })?;

        Ok(Self {
            database_url,
            port,
            anchor,
            hijri_year,
            roster_path,
            sheets_webhook_url,
            sync_interval_secs,
        })
    }
}
