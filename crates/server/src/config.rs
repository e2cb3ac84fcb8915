use database::db::DEFAULT_DATABASE_PATH;
use log::{info, warn};
use std::{env, fmt::Display, path::PathBuf, str::FromStr};

/// Server settings, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: PathBuf,
    /// Write changes back to the database file
    pub persist: bool,
}

impl Config {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        Self {
            port: try_load("PORT", 3333),
            database_path: PathBuf::from(try_load(
                "DATABASE_PATH",
                DEFAULT_DATABASE_PATH.to_string(),
            )),
            persist: try_load("PERSIST", true),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?} ({e}), using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
