//! Typed client for the component API.
//!
//! # Design
//! `AeroClient` is layered: `build_*` methods produce `HttpRequest` values
//! and `parse_*` methods consume `HttpResponse` values without touching the
//! network, while `execute` runs the round-trip through the one `ureq`
//! agent the client owns. Status interpretation lives entirely in the
//! parse layer — the agent is configured to hand back 4xx/5xx responses as
//! data rather than transport errors.
//!
//! The agent is the client's single connection resource: `close` releases
//! it and is idempotent, dropping the client releases it implicitly, and
//! any call after `close` fails with a connectivity error.

use std::time::Duration;

use ureq::Agent;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Component, ComponentCreate, ComponentType, ComponentUpdate, ErrorBody};

/// Synchronous client for the component API.
#[derive(Debug)]
pub struct AeroClient {
    base_url: String,
    agent: Option<Agent>,
}

/// Request timeout applied when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

impl AeroClient {
    /// Create a client for the service at `base_url` with the default
    /// request timeout.
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit global request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: Some(agent),
        }
    }

    /// Release the underlying agent. Safe to call any number of times;
    /// subsequent requests fail with a connectivity error.
    pub fn close(&mut self) {
        self.agent = None;
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.agent.is_none()
    }

    // --- request builders (no I/O) ---

    pub fn build_list_components(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/components", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_filter_components(&self, component_type: ComponentType) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!(
                "{}/api/components?component_type={}",
                self.base_url,
                component_type.as_str()
            ),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_component(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/components/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_component(&self, input: &ComponentCreate) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input)
            .map_err(|e| ApiError::validation(format!("failed to serialize payload: {e}")))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/components", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_update_component(
        &self,
        id: i64,
        input: &ComponentUpdate,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input)
            .map_err(|e| ApiError::validation(format!("failed to serialize payload: {e}")))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/api/components/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_component(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/api/components/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    // --- response parsers (no I/O) ---

    pub fn parse_list_components(&self, response: HttpResponse) -> Result<Vec<Component>, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_get_component(&self, response: HttpResponse) -> Result<Component, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_create_component(&self, response: HttpResponse) -> Result<Component, ApiError> {
        check_status(&response, 201)?;
        decode(&response.body)
    }

    pub fn parse_update_component(&self, response: HttpResponse) -> Result<Component, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_delete_component(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }

    // --- executing operations ---

    /// List every component. An empty vector is a valid result.
    pub fn list_components(&self) -> Result<Vec<Component>, ApiError> {
        let response = self.execute(self.build_list_components())?;
        self.parse_list_components(response)
    }

    /// List only the components of one category.
    pub fn filter_components(
        &self,
        component_type: ComponentType,
    ) -> Result<Vec<Component>, ApiError> {
        let response = self.execute(self.build_filter_components(component_type))?;
        self.parse_list_components(response)
    }

    /// Fetch one component by id.
    pub fn get_component(&self, id: i64) -> Result<Component, ApiError> {
        let response = self.execute(self.build_get_component(id))?;
        self.parse_get_component(response)
    }

    /// Create a component and return the persisted record, id and
    /// timestamps included.
    pub fn create_component(&self, input: &ComponentCreate) -> Result<Component, ApiError> {
        let request = self.build_create_component(input)?;
        let response = self.execute(request)?;
        self.parse_create_component(response)
    }

    /// Apply a partial update and return the resulting record.
    pub fn update_component(
        &self,
        id: i64,
        input: &ComponentUpdate,
    ) -> Result<Component, ApiError> {
        let request = self.build_update_component(id, input)?;
        let response = self.execute(request)?;
        self.parse_update_component(response)
    }

    /// Delete one component by id.
    pub fn delete_component(&self, id: i64) -> Result<(), ApiError> {
        let response = self.execute(self.build_delete_component(id))?;
        self.parse_delete_component(response)
    }

    /// Execute a request through the owned agent. Transport failures — and
    /// use after `close` — map to `ApiError::Connectivity`; any received
    /// response is returned as data for the parse layer.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let Some(agent) = &self.agent else {
            return Err(ApiError::connectivity("client is closed"));
        };

        let result = match (request.method, request.body) {
            (HttpMethod::Get, _) => agent.get(&request.path).call(),
            (HttpMethod::Delete, _) => agent.delete(&request.path).call(),
            (HttpMethod::Post, Some(body)) => agent
                .post(&request.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => agent.post(&request.path).send_empty(),
            (HttpMethod::Put, Some(body)) => agent
                .put(&request.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => agent.put(&request.path).send_empty(),
        };

        let mut response = result.map_err(|e| {
            ApiError::connectivity(format!("request to {} failed: {e}", self.base_url))
        })?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    match response.status {
        404 => Err(ApiError::NotFound),
        422 => Err(validation_from_body(&response.body)),
        status => Err(ApiError::Service {
            status,
            body: response.body.clone(),
        }),
    }
}

/// Decode a 422 body into field-level errors; keep the raw body as the
/// message when the server sent something unstructured.
fn validation_from_body(body: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => ApiError::Validation {
            message: parsed.message,
            errors: parsed.errors,
        },
        Err(_) => ApiError::validation(body.to_string()),
    }
}

/// Deserialize a success body; a shape mismatch is a validation error,
/// never a silent default.
fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        ApiError::validation(format!("response body did not match the expected shape: {e}"))
    })
}
