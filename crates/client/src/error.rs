use thiserror::Error;

/// Shown when the server gives no better explanation
pub const DEFAULT_MESSAGE: &str = "Unexpected server error. Try again in a few moments.";

/// Every failure a client operation can end in
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("You need to sign in first")]
    NotAuthenticated,

    #[error("Not allowed: {0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Local storage failed: {0}")]
    Storage(#[from] std::io::Error),
}

impl ServerError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Status { status: 404, .. })
    }
}
