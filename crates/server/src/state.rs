use database::db::JsonDb;

/// Shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: JsonDb,
}

impl AppState {
    pub fn new(db: JsonDb) -> Self {
        Self { db }
    }
}
