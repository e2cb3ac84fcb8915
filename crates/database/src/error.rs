use models::Id;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Record {0} not found")]
    NotFound(Id),

    #[error("Record {0} already exists")]
    DuplicateId(Id),

    #[error("No ids left after {0}")]
    IdsExhausted(Id),

    #[error("Expected a JSON object")]
    NotAnObject,

    #[error("Invalid record: {0}")]
    InvalidRecord(#[source] serde_json::Error),

    #[error("Malformed database file: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
