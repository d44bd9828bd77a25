//! Domain DTOs and payload validation for the component API.
//!
//! # Design
//! Serde handles shape-level validation (presence, types, enum labels);
//! the `validate` methods handle semantic constraints (`weight_kg > 0`,
//! length caps) and report every violated field at once rather than
//! stopping at the first. Mirror types live in the client crate; the
//! integration tests catch schema drift between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ServiceError};

/// Longest accepted `name`, in characters.
pub const NAME_MAX: usize = 255;
/// Longest accepted `description`, in characters.
pub const DESCRIPTION_MAX: usize = 1000;
/// Longest accepted `material`, in characters.
pub const MATERIAL_MAX: usize = 100;

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
    /// The wire/storage label for this category.
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

    /// Parse a label back into a category. Returns `None` for labels
    /// outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fuselage" => Some(Self::Fuselage),
            "wing" => Some(Self::Wing),
            "engine" => Some(Self::Engine),
            "landing_gear" => Some(Self::LandingGear),
            "avionics" => Some(Self::Avionics),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// All accepted labels, for error messages.
    pub fn labels() -> [&'static str; 6] {
        ["fuselage", "wing", "engine", "landing_gear", "avionics", "other"]
    }
}

/// A persisted component as returned by every endpoint.
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

/// Request payload for creating a component. The store assigns `id` and
/// the service assigns both timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentCreate {
    pub name: String,
    pub description: Option<String>,
    pub component_type: ComponentType,
    pub weight_kg: f64,
    pub material: Option<String>,
}

/// Request payload for updating a component. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
/// `id` and `created_at` are immutable.
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

impl ComponentUpdate {
    /// Whether the payload carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.component_type.is_none()
            && self.weight_kg.is_none()
            && self.material.is_none()
    }
}

fn check_name(errors: &mut Vec<FieldError>, name: &str) {
    if name.is_empty() {
        errors.push(FieldError::new("name", "must not be empty"));
    } else if name.chars().count() > NAME_MAX {
        errors.push(FieldError::new(
            "name",
            format!("must be at most {NAME_MAX} characters"),
        ));
    }
}

fn check_weight(errors: &mut Vec<FieldError>, weight_kg: f64) {
    // `!(x > 0.0)` also rejects NaN.
    if !(weight_kg > 0.0) {
        errors.push(FieldError::new("weight_kg", "must be greater than 0"));
    }
}

fn check_text(errors: &mut Vec<FieldError>, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("must be at most {max} characters"),
        ));
    }
}

impl ComponentCreate {
    /// Semantic validation of the payload. Reports every failing field.
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut errors = Vec::new();
        check_name(&mut errors, &self.name);
        check_weight(&mut errors, self.weight_kg);
        if let Some(description) = &self.description {
            check_text(&mut errors, "description", description, DESCRIPTION_MAX);
        }
        if let Some(material) = &self.material {
            check_text(&mut errors, "material", material, MATERIAL_MAX);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(errors))
        }
    }
}

impl ComponentUpdate {
    /// Semantic validation of the provided fields only.
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            check_name(&mut errors, name);
        }
        if let Some(weight_kg) = self.weight_kg {
            check_weight(&mut errors, weight_kg);
        }
        if let Some(description) = &self.description {
            check_text(&mut errors, "description", description, DESCRIPTION_MAX);
        }
        if let Some(material) = &self.material {
            check_text(&mut errors, "material", material, MATERIAL_MAX);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> ComponentCreate {
        ComponentCreate {
            name: "Main Wing".to_string(),
            description: None,
            component_type: ComponentType::Wing,
            weight_kg: 120.5,
            material: None,
        }
    }

    #[test]
    fn component_type_labels_roundtrip() {
        for label in ComponentType::labels() {
            let ty = ComponentType::parse(label).unwrap();
            assert_eq!(ty.as_str(), label);
        }
    }

    #[test]
    fn component_type_rejects_unknown_label() {
        assert!(ComponentType::parse("propeller").is_none());
    }

    #[test]
    fn component_type_serializes_as_snake_case() {
        let json = serde_json::to_value(ComponentType::LandingGear).unwrap();
        assert_eq!(json, "landing_gear");
    }

    #[test]
    fn component_serializes_to_json() {
        let created_at = "2024-03-01T12:00:00Z".parse().unwrap();
        let component = Component {
            id: 1,
            name: "Main Wing".to_string(),
            description: None,
            component_type: ComponentType::Wing,
            weight_kg: 120.5,
            material: Some("Aluminum".to_string()),
            created_at,
            updated_at: created_at,
        };
        let json = serde_json::to_value(&component).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Main Wing");
        assert_eq!(json["component_type"], "wing");
        assert_eq!(json["weight_kg"], 120.5);
        assert_eq!(json["material"], "Aluminum");
    }

    #[test]
    fn create_accepts_minimal_payload() {
        let input: ComponentCreate = serde_json::from_str(
            r#"{"name":"Main Wing","component_type":"wing","weight_kg":120.5}"#,
        )
        .unwrap();
        assert_eq!(input.name, "Main Wing");
        assert!(input.description.is_none());
        assert!(input.material.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn create_rejects_missing_name() {
        let result: Result<ComponentCreate, _> =
            serde_json::from_str(r#"{"component_type":"wing","weight_kg":1.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn create_rejects_unknown_component_type() {
        let result: Result<ComponentCreate, _> = serde_json::from_str(
            r#"{"name":"X","component_type":"propeller","weight_kg":1.0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn validate_names_weight_kg_on_zero_weight() {
        let input = ComponentCreate {
            weight_kg: 0.0,
            ..valid_create()
        };
        let err = input.validate().unwrap_err();
        match err {
            ServiceError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "weight_kg");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn validate_names_weight_kg_on_negative_weight() {
        let input = ComponentCreate {
            weight_kg: -1.0,
            ..valid_create()
        };
        let err = input.validate().unwrap_err();
        match err {
            ServiceError::Validation(errors) => {
                assert_eq!(errors[0].field, "weight_kg");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_nan_weight() {
        let input = ComponentCreate {
            weight_kg: f64::NAN,
            ..valid_create()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_name() {
        let input = ComponentCreate {
            name: String::new(),
            ..valid_create()
        };
        let err = input.validate().unwrap_err();
        match err {
            ServiceError::Validation(errors) => assert_eq!(errors[0].field, "name"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_overlong_name() {
        let input = ComponentCreate {
            name: "x".repeat(NAME_MAX + 1),
            ..valid_create()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn validate_reports_all_failing_fields() {
        let input = ComponentCreate {
            name: String::new(),
            weight_kg: -2.0,
            description: Some("d".repeat(DESCRIPTION_MAX + 1)),
            ..valid_create()
        };
        let err = input.validate().unwrap_err();
        match err {
            ServiceError::Validation(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["name", "weight_kg", "description"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn update_all_fields_optional() {
        let input: ComponentUpdate = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn update_validates_provided_fields_only() {
        let input: ComponentUpdate =
            serde_json::from_str(r#"{"weight_kg":-1}"#).unwrap();
        let err = input.validate().unwrap_err();
        match err {
            ServiceError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "weight_kg");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn update_skips_omitted_fields_when_serialized() {
        let input = ComponentUpdate {
            weight_kg: Some(9.5),
            ..ComponentUpdate::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({"weight_kg": 9.5}));
    }
}
