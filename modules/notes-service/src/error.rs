//! Mapping from note failures to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use notes_types::{ErrorBody, NoteError};

/// Error returned by route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Path id was not a positive integer
    InvalidId(String),
    /// Request body could not be decoded
    BadBody(String),
    Note(NoteError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) | ApiError::BadBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Note(NoteError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Note(NoteError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Note(NoteError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal details stay in the logs.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidId(_) => "Invalid id",
            ApiError::BadBody(_) | ApiError::Note(NoteError::InvalidInput(_)) => "Invalid input",
            ApiError::Note(NoteError::NotFound(_)) => "Not found",
            ApiError::Note(NoteError::Internal(_)) => "Internal error",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::InvalidId(raw) => write!(f, "invalid id '{}'", raw),
            ApiError::BadBody(e) => write!(f, "bad request body: {}", e),
            ApiError::Note(e) => write!(f, "{}", e),
        }
    }
}

impl From<NoteError> for ApiError {
    fn from(e: NoteError) -> Self {
        ApiError::Note(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("[NOTES] {}", self);
        } else {
            log::debug!("[NOTES] {} -> {}", self, status);
        }
        (status, Json(ErrorBody::new(self.message()))).into_response()
    }
}
