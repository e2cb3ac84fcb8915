pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use crate::{
    doc::ApiDoc,
    routes::{collection, db, health, root},
    state::AppState,
};
use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route("/db", get(db::snapshot))
        .route(
            "/{collection}",
            get(collection::list_records).post(collection::create_record),
        )
        .route(
            "/{collection}/{id}",
            get(collection::get_record)
                .patch(collection::patch_record)
                .delete(collection::delete_record),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
