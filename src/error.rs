//! Unified error types for the text service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Unified error type for the service process.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Request validation error.
    #[error("request error: {0}")]
    Request(#[from] RequestError),

    /// Prometheus recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while validating query parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// A required query parameter is absent.
    #[error("missing required query parameter '{name}'")]
    MissingParameter {
        /// Parameter name.
        name: &'static str,
    },

    /// A query parameter could not be parsed as the expected type.
    #[error("query parameter '{name}' must be {expected}, got '{value}'")]
    InvalidType {
        /// Parameter name.
        name: &'static str,
        /// Raw value received.
        value: String,
        /// Human readable expected type.
        expected: &'static str,
    },

    /// The generated text would exceed the configured ceiling.
    #[error("generated text would be {requested} bytes, limit is {limit}")]
    OutputTooLarge {
        /// Bytes the request would produce, if representable.
        requested: String,
        /// Configured limit in bytes.
        limit: usize,
    },
}

impl RequestError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingParameter { .. } => "missing_parameter",
            Self::InvalidType { .. } => "invalid_type",
            Self::OutputTooLarge { .. } => "output_too_large",
        }
    }

    /// Name of the offending parameter, when there is one.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::MissingParameter { name } | Self::InvalidType { name, .. } => Some(*name),
            Self::OutputTooLarge { .. } => None,
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// Error body returned for rejected requests.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable description.
    pub error: String,
    /// Offending query parameter.
    pub parameter: Option<String>,
}

impl From<&RequestError> for ErrorResponse {
    fn from(err: &RequestError) -> Self {
        Self {
            error: err.to_string(),
            parameter: err.parameter().map(str::to_string),
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        crate::metrics::inc_request_errors(self.kind());
        (self.status_code(), Json(ErrorResponse::from(&self))).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
