//! HTTP error responses for the config API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::envelope::{
    Empty, Envelope, MESSAGE_NO_SUCH_OPTION, MESSAGE_NO_SUCH_SECTION, MESSAGE_NOT_FOUND,
};
use crate::domain::error::RestConfigError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn no_such_section() -> Self {
        Self::not_found(MESSAGE_NO_SUCH_SECTION)
    }

    pub fn no_such_option() -> Self {
        Self::not_found(MESSAGE_NO_SUCH_OPTION)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<RestConfigError> for ApiError {
    fn from(err: RestConfigError) -> Self {
        match err {
            RestConfigError::NoSuchSection { .. } => Self::no_such_section(),
            RestConfigError::NoSuchOption { .. } => Self::no_such_option(),
            other => {
                tracing::warn!(error = %other, "config source failed");
                Self::internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope {
            message: self.message,
            data: Empty::default(),
        };
        (self.status, Json(body)).into_response()
    }
}

pub async fn not_found() -> ApiError {
    ApiError::not_found(MESSAGE_NOT_FOUND)
}
