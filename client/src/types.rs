//! Domain DTOs for the component API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently,
//! keeping the SDK free of any server-crate dependency. The live-server
//! integration tests catch schema drift between the two. The server owns
//! all persisted state; values returned here are transient copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of component categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Fuselage,
    Wing,
    Engine,
    LandingGear,
    Avionics,
    Other,
}

impl ComponentType {
    /// The wire label for this category, as used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fuselage => "fuselage",
            Self::Wing => "wing",
            Self::Engine => "engine",
            Self::LandingGear => "landing_gear",
            Self::Avionics => "avionics",
            Self::Other => "other",
        }
    }
}

/// A component record returned by the API. `id` and both timestamps are
/// assigned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Component {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub component_type: ComponentType,
    pub weight_kg: f64,
    pub material: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a component. Field constraints are
/// enforced server-side; a rejection surfaces as `ApiError::Validation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub component_type: ComponentType,
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

/// Request payload for updating a component. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_type: Option<ComponentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

/// One offending field reported by the server with a 4xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// The structured error body the server attaches to 4xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}
