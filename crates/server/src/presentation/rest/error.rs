use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tickerhub_aggregator::SnapshotError;
use tickerhub_core::ValidationError;

use crate::presentation::rest::dto::ErrorResponse;

/// API error type
#[derive(Debug)]
pub struct ApiError {
    pub code: i32,
    pub message: String,
    pub status: StatusCode,
}

impl ApiError {
    pub fn bad_request(code: i32, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn unauthorized() -> Self {
        ApiError {
            code: -2015,
            message: "Invalid webhook token.".to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        ApiError {
            code: -1001,
            message: message.into(),
            status: StatusCode::BAD_GATEWAY,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError {
            code: -1000,
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unknown_exchange(message: impl Into<String>) -> Self {
        Self::bad_request(-1121, message)
    }

    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::bad_request(-1100, reason)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::UnknownExchange { .. } => Self::unknown_exchange(err.to_string()),
            ValidationError::InvalidMaxPairs => Self::invalid_parameter(err.to_string()),
        }
    }
}

impl From<SnapshotError> for ApiError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Validation(e) => e.into(),
            SnapshotError::NotRegistered(_) => Self::unknown_exchange(err.to_string()),
            SnapshotError::Upstream { .. } => Self::bad_gateway(err.to_string()),
            SnapshotError::Internal(_) => Self::internal(err.to_string()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid_parameter(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(-1102, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.code, self.message));
        (self.status, body).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API Error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
