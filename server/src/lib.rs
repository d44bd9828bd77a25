//! HTTP service exposing CRUD endpoints for aerospace component records.
//!
//! # Overview
//! Each request is validated against the payload schema, performs exactly
//! one operation against the SQLite store, and returns either the full
//! record representation or a structured error body. There is no
//! cross-request state beyond the database file itself; the store
//! connection is opened per request and released when the request ends.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

pub mod config;
pub mod error;
pub mod model;
mod routes;
pub mod store;

pub use config::ServerConfig;
pub use error::{ErrorBody, FieldError, ServiceError, StoreError};
pub use model::{Component, ComponentCreate, ComponentType, ComponentUpdate};
pub use store::ComponentStore;

/// Shared router state: the process-wide configuration, passed explicitly.
pub type AppState = Arc<ServerConfig>;

/// Build the component API router around the given configuration.
pub fn app(config: ServerConfig) -> Router {
    let state: AppState = Arc::new(config);
    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/api/components",
            get(routes::list_components).post(routes::create_component),
        )
        .route(
            "/api/components/{id}",
            get(routes::get_component)
                .put(routes::update_component)
                .delete(routes::delete_component),
        )
        .with_state(state)
}

/// Serve the API on an already-bound listener until shutdown.
pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}
