//! Error handling - maps repository and rendering failures to HTTP responses.

use actix_web::http::{StatusCode, header::ContentType};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use scribe_core::RepoError;

/// Application-level error type returned by handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound(_) => "404 page not found",
            AppError::Internal(detail) => {
                // Details stay in the log, the client gets a generic page
                tracing::error!("Internal error: {}", detail);
                "Internal Server Error"
            }
        };

        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(body)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(link) => AppError::NotFound(format!("post {link}")),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<handlebars::RenderError> for AppError {
    fn from(err: handlebars::RenderError) -> Self {
        AppError::Internal(format!("template rendering failed: {err}"))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
