use log::{info, warn};
use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Client settings, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    /// Artificial delay added to every response
    pub latency: Duration,
    /// File standing in for the browser's local storage
    pub session_file: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_url: try_load("API_URL", DEFAULT_API_URL.to_string()),
            latency: Duration::from_millis(try_load("API_LATENCY_MS", 500)),
            session_file: PathBuf::from(try_load("SESSION_FILE", ".session.json".to_string())),
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
