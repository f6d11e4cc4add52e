use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignError {
    #[error("Invalid signing key")]
    InvalidKey,

    #[error("Expiry must be between 1 second and 7 days, got {0:?}")]
    InvalidExpiry(Duration),
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Missing filename query parameter")]
    MissingFilename,

    #[error(transparent)]
    Sign(#[from] SignError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = match self {
            UploadError::MissingFilename => StatusCode::BAD_REQUEST,
            UploadError::Sign(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Failed to generate upload URL: {}", self);
        }

        let body = ErrorBody {
            success: false,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
