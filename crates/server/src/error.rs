use crate::dtos::error::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::DbError;
use log::warn;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] DbError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Database(e) => match e {
                DbError::UnknownCollection(_) | DbError::NotFound(_) => StatusCode::NOT_FOUND,
                DbError::DuplicateId(_) | DbError::IdsExhausted(_) => StatusCode::CONFLICT,
                DbError::NotAnObject | DbError::InvalidRecord(_) => StatusCode::BAD_REQUEST,
                DbError::Malformed(_) | DbError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("Request failed: {self}");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
