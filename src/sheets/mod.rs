use async_trait::async_trait;
use reqwest::Client;

use crate::error::AppError;
use crate::models::DailyRecord;

#[derive(Clone, Debug)]
pub struct SheetsConfig {
    pub webhook_url: String,
}

/// Write-only mirror of the journal. The primary copy always lives in the
/// local store; a push failure must never fail the local write.
#[async_trait]
pub trait SheetsClient: Send + Sync {
    async fn push_record(&self, record: &DailyRecord) -> Result<(), AppError>;
}

pub struct SheetsHttpClient {
    client: Client,
    config: SheetsConfig,
}

impl SheetsHttpClient {
    pub fn new(config: SheetsConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::BadRequest(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl SheetsClient for SheetsHttpClient {
    async fn push_record(&self, record: &DailyRecord) -> Result<(), AppError> {
        let body = serde_json::to_string(record)
            .map_err(|_| AppError::InternalServerError)?;

        // text/plain keeps the Apps Script webhook from demanding a CORS
        // preflight it cannot answer.
        let response = self
            .client
            .post(&self.config.webhook_url)
            .header("Content-Type", "text/plain")
            .body(body)
            .send()
            .await
            .map_err(|_| AppError::InternalServerError)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Sheets webhook error {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

pub struct NoopSheetsClient;

#[async_trait]
impl SheetsClient for NoopSheetsClient {
    async fn push_record(&self, _record: &DailyRecord) -> Result<(), AppError> {
        Ok(())
    }
}
