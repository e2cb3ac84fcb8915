use crate::api::Api;
use database::{db::JsonDb, fixtures::dataset};
use server::{app, state::AppState};
use std::time::Duration;

/// Serves the fixture dataset on an ephemeral port and returns a
/// zero-latency client for it, plus the backing store for assertions
pub async fn spawn_backend() -> (Api, JsonDb) {
    let db = JsonDb::in_memory(dataset());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    let router = app(AppState::new(db.clone()));
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });

    (Api::new(format!("http://{addr}"), Duration::ZERO), db)
}
