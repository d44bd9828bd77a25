//! Error taxonomy for the component API client.
//!
//! # Design
//! Every failed call maps to exactly one variant: `NotFound` and
//! `Validation` get dedicated variants because callers routinely branch on
//! them, `Connectivity` covers every failure where no response was
//! obtained, and `Service` carries the raw status and body for anything
//! else. Nothing is swallowed and nothing falls back to an untyped error.

use thiserror::Error;

use crate::types::FieldError;

/// Errors returned by `AeroClient` operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server returned 404 — no component exists for the given id.
    #[error("component not found")]
    NotFound,

    /// The server rejected the payload (422), or a response body did not
    /// match the expected shape. `errors` names the offending fields when
    /// the server provided them.
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    /// No response was obtained: connection refused, timeout, DNS failure,
    /// or the client was already closed.
    #[error("connection failed: {message}")]
    Connectivity { message: String },

    /// The server returned a non-2xx status not covered above.
    #[error("HTTP {status}: {body}")]
    Service { status: u16, body: String },
}

impl ApiError {
    /// A validation error with a message but no field detail.
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn connectivity(message: impl Into<String>) -> Self {
        Self::Connectivity {
            message: message.into(),
        }
    }

    /// The fields the server named in a validation failure, if any.
    pub fn failing_fields(&self) -> &[FieldError] {
        match self {
            Self::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_and_body() {
        let err = ApiError::Service {
            status: 500,
            body: "internal server error".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: internal server error");
    }

    #[test]
    fn failing_fields_empty_for_non_validation() {
        assert!(ApiError::NotFound.failing_fields().is_empty());
    }

    #[test]
    fn failing_fields_surfaces_server_detail() {
        let err = ApiError::Validation {
            message: "validation failed".to_string(),
            errors: vec![FieldError {
                field: "weight_kg".to_string(),
                message: "must be greater than 0".to_string(),
            }],
        };
        assert_eq!(err.failing_fields()[0].field, "weight_kg");
    }
}
