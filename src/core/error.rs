//! Typed error handling for stash
//!
//! Every public operation of the query pipeline and the REST exposure returns
//! a [`StashError`]. Each variant maps to an HTTP status code and a stable
//! error code so clients can react to specific failures.
//!
//! # Error Categories
//!
//! - [`QueryError`]: client supplied sort/search/paging parameters that cannot run
//! - [`ConfigError`]: configuration parsing and validation
//! - [`StashError::Storage`]: the entity source failed
//! - [`StashError::Cancelled`]: the inbound request was cancelled mid-enumeration
//!
//! # Example
//!
//! ```rust,ignore
//! match pipeline.execute(&store, &query, &token).await {
//!     Ok(result) => render(result),
//!     Err(StashError::Query(QueryError::InvalidSearchOperation { field, .. })) => {
//!         println!("cannot search on {}", field);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Status used when the client went away before the response was ready.
///
/// Not part of the IANA registry; mirrors the de-facto "client closed request" code.
pub const CLIENT_CLOSED_REQUEST: u16 = 499;

/// The main error type for stash
#[derive(Debug, thiserror::Error)]
pub enum StashError {
    /// The collection query could not be executed
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The entity source failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// The request was cancelled while entities were being enumerated
    #[error("Request was cancelled")]
    Cancelled,

    /// A requested resource does not exist
    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: String },

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl StashError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            StashError::Query(_) => StatusCode::BAD_REQUEST,
            StashError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StashError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StashError::Cancelled => StatusCode::from_u16(CLIENT_CLOSED_REQUEST)
                .unwrap_or(StatusCode::REQUEST_TIMEOUT),
            StashError::NotFound { .. } => StatusCode::NOT_FOUND,
            StashError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            StashError::Query(e) => e.error_code(),
            StashError::Config(_) => "CONFIG_ERROR",
            StashError::Storage(_) => "STORAGE_ERROR",
            StashError::Cancelled => "REQUEST_CANCELLED",
            StashError::NotFound { .. } => "RESOURCE_NOT_FOUND",
            StashError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Cancellation is never retried and is reported apart from other failures
    pub fn is_cancelled(&self) -> bool {
        matches!(self, StashError::Cancelled)
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            StashError::Query(QueryError::InvalidSearchOperation {
                field,
                operator,
                value,
                ..
            }) => Some(serde_json::json!({
                "field": field,
                "operator": operator,
                "value": value,
            })),
            StashError::Query(QueryError::InvalidPaging(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            StashError::NotFound { resource, id } => Some(serde_json::json!({
                "resource": resource,
                "id": id,
            })),
            _ => None,
        }
    }
}

impl IntoResponse for StashError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for StashError {
    fn from(err: anyhow::Error) -> Self {
        StashError::Storage(err.to_string())
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors raised while interpreting sort/search/paging parameters
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    /// A known searchable field was used with an operator its comparison
    /// strategy does not support, or with a literal of the wrong type
    #[error("Invalid search operation '{field} {operator} {value}': {reason}")]
    InvalidSearchOperation {
        field: String,
        operator: String,
        value: String,
        reason: String,
    },

    /// Paging parameters are out of range or malformed
    #[error("Invalid paging parameters: {}", .0.join(", "))]
    InvalidPaging(Vec<String>),
}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::InvalidSearchOperation { .. } => "INVALID_SEARCH_OPERATION",
            QueryError::InvalidPaging(_) => "INVALID_PAGING",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or parse a configuration source
    #[error("Failed to parse config: {message}")]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// A configuration value is invalid
    #[error("Invalid config value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias using StashError
pub type StashResult<T> = Result<T, StashError>;
