use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::errors::SyncError;
use crate::application::services::codec::ContentFormatError;
use crate::application::services::explorer::ExplorerError;
use crate::domain::repository::config::ConfigIncomplete;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Config fields that still need a value; only set on 412.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub missing: Vec<&'static str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            missing: Vec::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(err: anyhow::Error) -> Self {
        tracing::error!(error = ?err, "request_failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
            missing: self.missing.iter().map(|m| m.to_string()).collect(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err)
    }
}

impl From<ConfigIncomplete> for ApiError {
    fn from(err: ConfigIncomplete) -> Self {
        Self {
            status: StatusCode::PRECONDITION_FAILED,
            message: err.to_string(),
            missing: err.missing,
        }
    }
}

impl From<ContentFormatError> for ApiError {
    fn from(err: ContentFormatError) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
    }
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::ConfigIncomplete(e) => e.into(),
            SyncError::FetchFailed(message) => Self::new(StatusCode::BAD_GATEWAY, message),
            SyncError::ContentFormat(e) => e.into(),
        }
    }
}

impl From<ExplorerError> for ApiError {
    fn from(err: ExplorerError) -> Self {
        let message = err.to_string();
        match err {
            ExplorerError::ConfigIncomplete(e) => e.into(),
            ExplorerError::Busy | ExplorerError::NothingToRetry => {
                Self::new(StatusCode::CONFLICT, message)
            }
            ExplorerError::UnknownEntry(_) => Self::new(StatusCode::NOT_FOUND, message),
        }
    }
}
