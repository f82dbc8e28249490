//! HTTP API handlers.

use std::time::Instant;

use axum::{
    async_trait,
    extract::{FromRequestParts, MatchedPath, Query, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::config::Config;
use crate::error::{ErrorResponse, RequestError};
use crate::metrics;
use crate::transform::{self, Capitalization};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Largest `/generate` output, in bytes.
    pub max_generated_bytes: usize,
    /// Wrap the router in a permissive CORS layer.
    pub cors_permissive: bool,
    /// Prometheus render handle, when a recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create app state with default limits and no metrics exporter.
    pub fn new() -> Self {
        Self::from_config(&Config::default(), None)
    }

    /// Create app state from loaded configuration.
    pub fn from_config(config: &Config, prometheus: Option<PrometheusHandle>) -> Self {
        Self {
            max_generated_bytes: config.max_generated_bytes,
            cors_permissive: config.cors_permissive,
            prometheus,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw `/uppercase` query string.
#[derive(Debug, Default)]
pub struct UppercaseQuery {
    /// Text to convert.
    pub text: Option<String>,
}

/// Validated `/uppercase` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UppercaseRequest {
    /// Text to convert.
    pub text: String,
}

impl UppercaseQuery {
    /// Collect known parameters; the first occurrence of a key wins.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            if key == "text" && query.text.is_none() {
                query.text = Some(value);
            }
        }
        query
    }

    /// Check required parameters.
    pub fn validate(self) -> Result<UppercaseRequest, RequestError> {
        let text = self
            .text
            .ok_or(RequestError::MissingParameter { name: "text" })?;
        Ok(UppercaseRequest { text })
    }
}

/// Raw `/generate` query string.
#[derive(Debug, Default)]
pub struct GenerateQuery {
    /// Message to process.
    pub message: Option<String>,
    /// Number of copies, as sent.
    pub duplication_factor: Option<String>,
    /// Case conversion, as sent.
    pub capitalization: Option<String>,
}

/// Validated `/generate` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Message to process.
    pub message: String,
    /// Number of copies.
    pub duplication_factor: usize,
    /// Case conversion, if any.
    pub capitalization: Option<Capitalization>,
}

impl GenerateQuery {
    /// Collect known parameters; the first occurrence of a key wins.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "message" => &mut query.message,
                "duplication_factor" => &mut query.duplication_factor,
                "capitalization" => &mut query.capitalization,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    /// Check required parameters and parse typed values.
    ///
    /// `duplication_factor` defaults to 1 and must be a non-negative integer;
    /// single underscores between digits are allowed (`1_000`).
    /// An unrecognized `capitalization` is ignored.
    pub fn validate(self) -> Result<GenerateRequest, RequestError> {
        let message = self
            .message
            .ok_or(RequestError::MissingParameter { name: "message" })?;

        let duplication_factor = match self.duplication_factor {
            None => 1,
            Some(raw) => {
                parse_duplication_factor(&raw).ok_or_else(|| RequestError::InvalidType {
                    name: "duplication_factor",
                    value: raw.clone(),
                    expected: "a non-negative integer",
                })?
            }
        };

        let capitalization = Capitalization::from_query(self.capitalization.as_deref());
        if capitalization.is_none() {
            if let Some(raw) = self.capitalization.as_deref().filter(|v| !v.is_empty()) {
                debug!(value = raw, "Ignoring unrecognized capitalization");
            }
        }

        Ok(GenerateRequest {
            message,
            duplication_factor,
            capitalization,
        })
    }
}

/// Parse a non-negative integer with optional `+` sign, surrounding
/// whitespace, and single underscores between digits.
fn parse_duplication_factor(raw: &str) -> Option<usize> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    if !digits.bytes().all(|b| b.is_ascii_digit() || b == b'_')
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return None;
    }

    digits.replace('_', "").parse().ok()
}

/// Decoded query string as ordered key/value pairs.
fn query_pairs(parts: &Parts) -> Vec<(String, String)> {
    // Decoding into string pairs is lossy and never rejects.
    Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default()
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for UppercaseRequest {
    type Rejection = RequestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        UppercaseQuery::from_pairs(query_pairs(parts))
            .validate()
            .inspect_err(|e| debug!(error = %e, "Rejected"))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for GenerateRequest {
    type Rejection = RequestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        GenerateQuery::from_pairs(query_pairs(parts))
            .validate()
            .inspect_err(|e| debug!(error = %e, "Rejected"))
    }
}

/// `/uppercase` response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UppercaseResponse {
    /// The text in uppercase.
    pub text: String,
}

/// `/generate` response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    /// The processed message.
    pub generated_text: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Uppercase the `text` query parameter.
#[utoipa::path(
    get,
    path = "/uppercase",
    tag = "Text Processing",
    params(
        ("text" = String, Query, description = "The text to be converted to uppercase")
    ),
    responses(
        (status = 200, description = "A successful GET request", body = UppercaseResponse),
        (status = 400, description = "The text parameter is missing", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn uppercase(request: UppercaseRequest) -> Json<UppercaseResponse> {
    Json(UppercaseResponse {
        text: transform::uppercase(&request.text),
    })
}

/// Generate a duplicated, optionally case-converted message.
#[utoipa::path(
    get,
    path = "/generate",
    tag = "String Processing",
    params(
        ("message" = String, Query, description = "The message to be processed"),
        ("duplication_factor" = Option<u64>, Query,
            description = "The number of times the message should be duplicated (default 1)"),
        ("capitalization" = Option<Capitalization>, Query,
            description = "UPPER for uppercase, LOWER for lowercase; any other value leaves the case unchanged")
    ),
    responses(
        (status = 200, description = "A successful GET request", body = GenerateResponse),
        (status = 400, description = "Missing or invalid parameter, or output too large", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn generate(
    State(state): State<AppState>,
    request: GenerateRequest,
) -> Result<Json<GenerateResponse>, RequestError> {
    let limit = state.max_generated_bytes;
    match transform::generated_len(
        &request.message,
        request.duplication_factor,
        request.capitalization,
    ) {
        Some(len) if len <= limit => {}
        len => {
            let requested = match len {
                Some(n) => n.to_string(),
                None => format!("more than {}", usize::MAX),
            };
            let err = RequestError::OutputTooLarge { requested, limit };
            debug!(error = %err, "Rejected");
            return Err(err);
        }
    }

    let generated_text = transform::generate(
        &request.message,
        request.duplication_factor,
        request.capitalization,
    );
    metrics::record_generated_bytes(generated_text.len());

    Ok(Json(GenerateResponse { generated_text }))
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus exposition - 503 when no recorder is installed.
pub async fn metrics_export(State(state): State<AppState>) -> Response {
    match state.prometheus {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

/// Middleware recording request count and latency per matched route.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;
    metrics::record_http_request(start, &endpoint, response.status().as_u16());
    response
}
