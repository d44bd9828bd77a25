//! Typed SDK for the aerospace component service.
//!
//! # Overview
//! `AeroClient` wraps the service's REST endpoints in typed method calls:
//! responses deserialize into [`Component`] records and every non-success
//! outcome maps to exactly one [`ApiError`] variant.
//!
//! # Design
//! - Each operation is split into `build_*` (produces an [`HttpRequest`])
//!   and `parse_*` (consumes an [`HttpResponse`]), with the network
//!   round-trip in between — the request/response contract is testable
//!   without a server.
//! - The client owns one `ureq` agent; `close` releases it idempotently
//!   and dropping the client releases it implicitly.
//! - DTOs are defined independently of the server crate; the live-server
//!   integration tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::{AeroClient, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    Component, ComponentCreate, ComponentType, ComponentUpdate, ErrorBody, FieldError,
};
