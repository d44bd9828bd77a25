//! Error types for the component service.
//!
//! # Design
//! `StoreError` wraps everything that can go wrong at the SQLite boundary;
//! `ServiceError` is the request-level taxonomy that maps directly onto
//! HTTP responses. Store detail never reaches the wire: it is logged and
//! collapsed into a generic 500 body.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ComponentType;

/// A specialized `Result` for request handling.
pub type Result<T, E = ServiceError> = std::result::Result<T, E>;

/// One offending field in a rejected payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// JSON body returned with every non-2xx response.
///
/// `errors` is empty for failures that are not tied to specific fields
/// (not-found, internal errors).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

/// Errors raised at the data-access boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database file could not be opened.
    #[error("failed to open database at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A query or statement failed.
    #[error("database query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// Request-level errors, mapped onto HTTP status codes by `IntoResponse`.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No component exists for the requested id.
    #[error("component not found")]
    NotFound,

    /// Semantic validation of the payload failed.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// The request body could not be deserialized into the payload type.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The `component_type` query filter carried an unknown label.
    #[error("invalid component type: {0}")]
    InvalidFilter(String),

    /// A store operation failed. Detail is logged, never serialized.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A blocking task failed to complete.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message: "component not found".to_string(),
                    errors: Vec::new(),
                },
            ),
            Self::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    message: "validation failed".to_string(),
                    errors,
                },
            ),
            Self::MalformedBody(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    message: "validation failed".to_string(),
                    errors: vec![FieldError::new("body", detail)],
                },
            ),
            Self::InvalidFilter(label) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: format!("invalid component type: {label}"),
                    errors: vec![FieldError::new(
                        "component_type",
                        format!("must be one of: {}", ComponentType::labels().join(", ")),
                    )],
                },
            ),
            Self::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: "internal server error".to_string(),
                        errors: Vec::new(),
                    },
                )
            }
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "request handling failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: "internal server error".to_string(),
                        errors: Vec::new(),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
