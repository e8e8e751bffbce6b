use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Application error taxonomy. The `IntoResponse` impl is the single place
/// where failures become wire responses, so status codes and messages stay
/// uniform across routes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input; the message is safe to show the caller verbatim.
    #[error("{0}")]
    Validation(String),

    /// Missing or unusable bearer/cookie identity.
    #[error("Authentication required")]
    Unauthenticated,

    /// Login failure. One fixed message for unknown email and wrong
    /// password, so responses cannot be used to enumerate accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The caller is known but not allowed to do this.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// Underlying store failure. Logged in full, surfaced generically.
    #[error(transparent)]
    Storage(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Storage(e) => {
                error!(error = %e, "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, storage_message(e))
            }
            AppError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// A couple of recognizable SQLite failures get an operational hint, with
/// no filesystem paths in the message. Everything else stays generic.
fn storage_message(err: &sqlx::Error) -> String {
    let detail = err
        .as_database_error()
        .map(|d| d.message().to_lowercase())
        .unwrap_or_default();

    if detail.contains("readonly") {
        "Storage error: the database is read-only; check write permissions on the data directory"
            .into()
    } else if detail.contains("unable to open") {
        "Storage error: the database could not be opened; check that the data directory exists"
            .into()
    } else {
        "Internal server error".into()
    }
}
