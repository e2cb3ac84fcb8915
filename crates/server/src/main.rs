use database::db::JsonDb;
use log::info;
use server::{app, config::Config, state::AppState, utils::shutdown::shutdown_signal};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::load();

    let db = JsonDb::open(&config.database_path).await?;
    let db = if config.persist {
        db
    } else {
        info!("PERSIST is off, changes stay in memory");
        db.detached()
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Running axum on http://localhost:{}", config.port);
    info!("API docs at http://localhost:{}/docs", config.port);

    axum::serve(listener, app(AppState::new(db)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
