use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ramadhan_backend::api::router;
use ramadhan_backend::calendar::RamadhanCalendar;
use ramadhan_backend::config::Config;
use ramadhan_backend::roster::Roster;
use ramadhan_backend::services::SyncScheduler;
use ramadhan_backend::sheets::{NoopSheetsClient, SheetsClient, SheetsConfig, SheetsHttpClient};
use ramadhan_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "ramadhan_backend=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::new_from_env()?;

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let sheets: Arc<dyn SheetsClient> = match &config.sheets_webhook_url {
        Some(url) => Arc::new(SheetsHttpClient::new(SheetsConfig {
            webhook_url: url.clone(),
        })?),
        None => {
            info!("SHEETS_WEBHOOK_URL not set, cloud mirror disabled");
            Arc::new(NoopSheetsClient)
        }
    };

    let calendar = RamadhanCalendar::new(config.anchor, config.hijri_year);
    let roster = Arc::new(Roster::load(config.roster_path.as_deref()));
    info!(
        "Journal anchored at {} with {} students on the roster",
        config.anchor,
        roster.len()
    );

    let state = AppState {
        db: pool.clone(),
        sheets: sheets.clone(),
        calendar,
        roster,
    };

    let scheduler = SyncScheduler::new(pool, sheets, config.sync_interval_secs);
    tokio::spawn(scheduler.start());

    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
