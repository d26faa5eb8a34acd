use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use tracing::info;

use crate::services::sync_service::SyncService;
use crate::sheets::SheetsClient;

/// Periodically retries the mirror push so records written while the webhook
/// was unreachable still make it out.
pub struct SyncScheduler {
    db: SqlitePool,
    sheets: Arc<dyn SheetsClient>,
    interval: Duration,
}

impl SyncScheduler {
    pub fn new(db: SqlitePool, sheets: Arc<dyn SheetsClient>, interval_secs: u64) -> Self {
        Self {
            db,
            sheets,
            interval: Duration::from_secs(interval_secs),
        }
    }

    pub async fn start(self) {
        info!("Starting auto-sync scheduler (interval: {:?})", self.interval);

        loop {
            tokio::time::sleep(self.interval).await;

            match self.run_sync().await {
                Ok(stats) => {
                    info!(
                        "Auto-sync completed - pushed: {}, skipped: {}",
                        stats.pushed, stats.skipped
                    );
                }
                Err(e) => {
                    // The loop survives a failed run; pending records are
                    // picked up again on the next tick.
                    tracing::warn!("Auto-sync failed: {:?}", e);
                }
            }
        }
    }

    async fn run_sync(&self) -> Result<crate::services::SyncStats, crate::error::AppError> {
        let service = SyncService::new(self.db.clone(), self.sheets.clone());
        service.push_pending().await
    }
}
