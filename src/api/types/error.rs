//! API error types and the failure envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;

/// Message returned for every unexpected server-side failure
pub const UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected error occurred while processing the data";

/// Error categories exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    ValidationError,
    UnsupportedFormatError,
    PayloadTooLargeError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationError => write!(f, "validation_error"),
            Self::UnsupportedFormatError => write!(f, "unsupported_format_error"),
            Self::PayloadTooLargeError => write!(f, "payload_too_large_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Failure envelope: `{"success": false, "message": ..., "error": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: ApiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    /// Offending input field, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                success: false,
                message: message.into(),
                error: ApiErrorDetail {
                    error_type,
                    param: None,
                    code: None,
                },
            },
        }
    }

    /// Add parameter info
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.response.error.param = Some(param.into());
        self
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    /// Upload with an extension other than csv, xlsx or xls
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::UnsupportedFormatError, message)
            .with_code("unsupported_format")
    }

    /// Request that cannot be processed: unreadable body, missing file, invalid record
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorType::ValidationError,
            message,
        )
    }

    /// Upload larger than the configured limit
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            ApiErrorType::PayloadTooLargeError,
            message,
        )
    }

    /// Internal server error with the generic message
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorType::ServerError,
            UNEXPECTED_ERROR_MESSAGE,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();

        match err {
            DomainError::MissingOrInvalidField { field, .. } => Self::unprocessable(message)
                .with_param(field)
                .with_code("missing_or_invalid_field"),
            DomainError::Validation { .. } => Self::unprocessable(message),
            DomainError::EmptyInput { .. } => {
                Self::unprocessable(message).with_code("empty_input")
            }
            DomainError::Parse { .. } => Self::unprocessable(message).with_code("parse_error"),
            DomainError::UnsupportedFormat { .. } => Self::unsupported_format(message),
            DomainError::Model { .. }
            | DomainError::Configuration { .. }
            | DomainError::Internal { .. } => {
                error!(error = %message, "Unexpected error while processing request");
                Self::internal()
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::unprocessable("No file provided");
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.response.error.error_type, ApiErrorType::ValidationError);
        assert_eq!(err.response.message, "No file provided");
        assert!(!err.response.success);
    }

    #[test]
    fn test_missing_field_maps_to_422_with_param() {
        let api_err: ApiError = DomainError::missing_or_invalid("st_rad", "value is required").into();

        assert_eq!(api_err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_err.response.error.param, Some("st_rad".to_string()));
        assert_eq!(
            api_err.response.error.code,
            Some("missing_or_invalid_field".to_string())
        );
    }

    #[test]
    fn test_unsupported_format_maps_to_400() {
        let api_err: ApiError = DomainError::unsupported_format("koi.json").into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_err.response.error.error_type, ApiErrorType::UnsupportedFormatError);
    }

    #[test]
    fn test_empty_input_maps_to_422() {
        let api_err: ApiError = DomainError::empty_input("no rows").into();
        assert_eq!(api_err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_server_errors_do_not_leak_detail() {
        for err in [
            DomainError::model("coefficient matrix is 3x29"),
            DomainError::internal("task panicked"),
            DomainError::configuration("missing file /etc/secret"),
        ] {
            let api_err: ApiError = err.into();
            assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(api_err.response.message, UNEXPECTED_ERROR_MESSAGE);
        }
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::unprocessable("Validation error: bad row").with_code("parse_error");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["type"], "validation_error");
        assert_eq!(json["error"]["code"], "parse_error");
        assert!(json["error"].get("param").is_none());
    }
}
