//! Engine errors mapped onto HTTP status codes and a `{code, message}` body.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::engine::EngineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable code for programmatic handling.
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Engine(EngineError),
    /// The body could not be decoded.
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Engine(e) => match e {
                EngineError::InvalidDate(_)
                | EngineError::InvalidRange { .. }
                | EngineError::Invalid(_)
                | EngineError::LimitExceeded(_) => StatusCode::BAD_REQUEST,
                EngineError::NotFound { .. } => StatusCode::NOT_FOUND,
                EngineError::Conflict(_) => StatusCode::CONFLICT,
                EngineError::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                EngineError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Engine(e) => match e {
                EngineError::InvalidDate(_) => "INVALID_DATE",
                EngineError::InvalidRange { .. } => "INVALID_RANGE",
                EngineError::Invalid(_) => "INVALID_REQUEST",
                EngineError::LimitExceeded(_) => "LIMIT_EXCEEDED",
                EngineError::NotFound { .. } => "NOT_FOUND",
                EngineError::Conflict(_) => "CONFLICT",
                EngineError::StorageUnavailable => "STORAGE_UNAVAILABLE",
                EngineError::Storage(_) => "STORAGE_ERROR",
            },
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Engine(e) => write!(f, "{e}"),
            AppError::BadRequest(msg) => write!(f, "{msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {self}");
        }
        let body = ApiError::new(self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::Engine(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
