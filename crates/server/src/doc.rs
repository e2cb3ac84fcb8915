use crate::{
    dtos::error::ErrorResponse,
    routes::{collection, db, health, root},
};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        db::snapshot,
        collection::list_records,
        collection::get_record,
        collection::create_record,
        collection::patch_record,
        collection::delete_record
    ),
    components(schemas(ErrorResponse, health::HealthResponse)),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Database", description = "Whole-database access"),
        (name = "Collections", description = "Generic record access for every collection"),
    ),
    info(
        title = "Scheduling Mock API",
        version = "1.0.0",
        description = "Mock backend for the course scheduling client",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
