//! HTTP handlers for the component endpoints.
//!
//! Each handler is a single stateless request/response transition: validate,
//! perform exactly one store operation, respond. The store is opened inside
//! `with_store` for the duration of the request and dropped on every exit
//! path. rusqlite is synchronous, so store work runs on the blocking pool.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{Result, ServiceError, StoreError};
use crate::model::{Component, ComponentCreate, ComponentType, ComponentUpdate};
use crate::store::ComponentStore;
use crate::AppState;

/// Run one store operation on the blocking pool against a per-request
/// connection.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T>
where
    F: FnOnce(&ComponentStore) -> std::result::Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let path = state.database_path.clone();
    tokio::task::spawn_blocking(move || {
        let store = ComponentStore::open(&path)?;
        op(&store)
    })
    .await
    .map_err(|e| ServiceError::Internal(format!("blocking task failed: {e}")))?
    .map_err(ServiceError::from)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    component_type: Option<String>,
}

pub(crate) async fn list_components(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Component>>> {
    let filter = match params.component_type.as_deref() {
        Some(label) => Some(
            ComponentType::parse(label)
                .ok_or_else(|| ServiceError::InvalidFilter(label.to_string()))?,
        ),
        None => None,
    };
    let components = with_store(&state, move |store| store.list(filter)).await?;
    Ok(Json(components))
}

pub(crate) async fn get_component(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Component>> {
    let component = with_store(&state, move |store| store.get(id)).await?;
    component.map(Json).ok_or(ServiceError::NotFound)
}

pub(crate) async fn create_component(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ComponentCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Component>)> {
    let Json(input) = payload.map_err(|rejection| ServiceError::MalformedBody(rejection.body_text()))?;
    input.validate()?;
    let component = with_store(&state, move |store| store.insert(&input)).await?;
    tracing::info!(id = component.id, "created component");
    Ok((StatusCode::CREATED, Json(component)))
}

pub(crate) async fn update_component(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: std::result::Result<Json<ComponentUpdate>, JsonRejection>,
) -> Result<Json<Component>> {
    let Json(input) = payload.map_err(|rejection| ServiceError::MalformedBody(rejection.body_text()))?;
    input.validate()?;
    let component = with_store(&state, move |store| store.update(id, &input)).await?;
    component.map(Json).ok_or(ServiceError::NotFound)
}

pub(crate) async fn delete_component(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let deleted = with_store(&state, move |store| store.delete(id)).await?;
    if deleted {
        tracing::info!(id, "deleted component");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::NotFound)
    }
}

pub(crate) async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy"}))
}
