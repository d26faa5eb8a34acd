use std::sync::Arc;

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::repository;
use crate::{error::AppError, sheets::SheetsClient};

/// Pushes locally written records to the spreadsheet mirror. The local store
/// is authoritative; a record that fails to push stays 'pending' and is
/// retried on the next run.
pub struct SyncService {
    db: SqlitePool,
    sheets: Arc<dyn SheetsClient>,
}

#[derive(Debug, Serialize)]
pub struct SyncStats {
    pub pushed: usize,
    pub skipped: usize,
}

impl SyncService {
    pub fn new(db: SqlitePool, sheets: Arc<dyn SheetsClient>) -> Self {
        Self { db, sheets }
    }

    pub async fn push_pending(&self) -> Result<SyncStats, AppError> {
        let pending = repository::fetch_pending_records(&self.db).await?;
        info!("Pushing {} pending records to the mirror", pending.len());

        let mut stats = SyncStats {
            pushed: 0,
            skipped: 0,
        };

        for record in pending {
            match self.sheets.push_record(&record).await {
                Ok(()) => {
                    let now = chrono::Utc::now().to_rfc3339();
                    repository::mark_record_synced(
                        &self.db,
                        &record.student_name,
                        record.day,
                        &now,
                    )
                    .await?;
                    stats.pushed += 1;
                }
                Err(e) => {
                    warn!(
                        "Failed to push record for {} day {}: {}",
                        record.student_name, record.day, e
                    );
                    stats.skipped += 1;
                }
            }
        }

        info!(
            "Mirror push completed: {} pushed, {} skipped",
            stats.pushed, stats.skipped
        );
        Ok(stats)
    }
}
