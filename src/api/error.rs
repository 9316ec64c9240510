//! Mapping of library errors to HTTP responses.

use crate::error::PodnewsError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl PodnewsError {
    /// HTTP status for this error at the API boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PodnewsError::InvalidUrl(_)
            | PodnewsError::InvalidInput(_)
            | PodnewsError::UnsupportedFormat(_)
            | PodnewsError::TranscriptUnavailable(_)
            | PodnewsError::GenerationFailed(_) => StatusCode::BAD_REQUEST,
            PodnewsError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PodnewsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else if !self.is_client_error() {
            warn!("Request failed: {}", self);
        }

        let body = ErrorResponse {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PodnewsError::InvalidUrl("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            PodnewsError::UnsupportedFormat("pdf".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PodnewsError::TranscriptUnavailable("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PodnewsError::GenerationFailed("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(PodnewsError::NotFound("Session".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            PodnewsError::Export("zip".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            PodnewsError::Io(std::io::Error::other("disk")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
