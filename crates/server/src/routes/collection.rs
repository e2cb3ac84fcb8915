use crate::{dtos::error::ErrorResponse, error::ApiError, state::AppState};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::collection::{Collection, Filter};
use log::debug;
use models::Id;
use serde_json::Value;

fn parse_record_path(collection: &str, id: &str) -> Result<(Collection, Id), ApiError> {
    let collection = collection.parse::<Collection>()?;
    // an id that can't exist is just a missing record
    let id = id.parse::<Id>().map_err(|_| ApiError::NotFound)?;

    Ok((collection, id))
}

/// List the records of a collection, filtered by field equality
#[utoipa::path(
    get,
    path = "/{collection}",
    params(
        ("collection" = String, Path, description = "Collection name, e.g. `shiftRequests`"),
        ("field" = Option<String>, Query, description = "Any record field; `null` matches empty fields")
    ),
    responses(
        (status = 200, description = "Matching records"),
        (status = 404, description = "Unknown collection", body = ErrorResponse)
    ),
    tag = "Collections"
)]
pub async fn list_records(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let collection = collection.parse::<Collection>()?;
    let filter = Filter::from_pairs(params);

    let records = state.db.list(collection, &filter).await?;
    debug!("GET /{collection} matched {} records", records.len());

    Ok(Json(records))
}

/// Get a single record
#[utoipa::path(
    get,
    path = "/{collection}/{id}",
    params(
        ("collection" = String, Path, description = "Collection name"),
        ("id" = u32, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Record found"),
        (status = 404, description = "Unknown collection or record", body = ErrorResponse)
    ),
    tag = "Collections"
)]
pub async fn get_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let (collection, id) = parse_record_path(&collection, &id)?;

    state
        .db
        .get(collection, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Create a record; the id is assigned when omitted
#[utoipa::path(
    post,
    path = "/{collection}",
    params(
        ("collection" = String, Path, description = "Collection name")
    ),
    responses(
        (status = 201, description = "Record created"),
        (status = 400, description = "Record doesn't fit the collection", body = ErrorResponse),
        (status = 404, description = "Unknown collection", body = ErrorResponse),
        (status = 409, description = "A record with that id already exists", body = ErrorResponse)
    ),
    tag = "Collections"
)]
pub async fn create_record(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(record): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let collection = collection.parse::<Collection>()?;
    let stored = state.db.insert(collection, record).await?;
    debug!("POST /{collection} stored {}", stored["id"]);

    Ok((StatusCode::CREATED, Json(stored)))
}

/// Merge fields into an existing record
#[utoipa::path(
    patch,
    path = "/{collection}/{id}",
    params(
        ("collection" = String, Path, description = "Collection name"),
        ("id" = u32, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Updated record"),
        (status = 400, description = "The merged record is invalid", body = ErrorResponse),
        (status = 404, description = "Unknown collection or record", body = ErrorResponse)
    ),
    tag = "Collections"
)]
pub async fn patch_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(changes): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let (collection, id) = parse_record_path(&collection, &id)?;

    state
        .db
        .patch(collection, id, changes)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Delete a record, returning it
#[utoipa::path(
    delete,
    path = "/{collection}/{id}",
    params(
        ("collection" = String, Path, description = "Collection name"),
        ("id" = u32, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Removed record"),
        (status = 404, description = "Unknown collection or record", body = ErrorResponse)
    ),
    tag = "Collections"
)]
pub async fn delete_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let (collection, id) = parse_record_path(&collection, &id)?;

    state
        .db
        .remove(collection, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}
