use std::sync::Arc;

use sqlx::SqlitePool;

use crate::calendar::RamadhanCalendar;
use crate::roster::Roster;
use crate::sheets::SheetsClient;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub sheets: Arc<dyn SheetsClient>,
    pub calendar: RamadhanCalendar,
    pub roster: Arc<Roster>,
}
