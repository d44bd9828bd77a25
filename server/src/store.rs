//! SQLite-backed data-access boundary for components.
//!
//! # Design
//! `ComponentStore` owns a single `rusqlite::Connection`. A store is opened
//! at the start of a request and dropped at the end of it; the database
//! file is the only state shared between requests. Timestamps are assigned
//! here (service side) and stored as RFC 3339 text; the `weight_kg > 0`
//! invariant is enforced at the validation boundary, not by the schema.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::error::StoreError;
use crate::model::{Component, ComponentCreate, ComponentType, ComponentUpdate};

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS components (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    component_type TEXT NOT NULL,
    weight_kg REAL NOT NULL,
    material TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_components_type ON components(component_type);
";

/// Data-access boundary translating typed operations into SQLite queries.
#[derive(Debug)]
pub struct ComponentStore {
    conn: Connection,
}

impl ComponentStore {
    /// Open or create the database at the given path and ensure the schema
    /// exists. WAL mode keeps concurrent per-request connections cheap.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: PathBuf::from(path),
            source,
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// List all components in insertion order, optionally restricted to a
    /// single category. Always returns a (possibly empty) vector.
    pub fn list(&self, filter: Option<ComponentType>) -> Result<Vec<Component>, StoreError> {
        let components = match filter {
            Some(ty) => {
                let mut stmt = self.conn.prepare(
                    r"
                    SELECT id, name, description, component_type, weight_kg, material,
                           created_at, updated_at
                    FROM components WHERE component_type = ?1 ORDER BY id
                    ",
                )?;
                let rows = stmt.query_map([ty.as_str()], row_to_component)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self.conn.prepare(
                    r"
                    SELECT id, name, description, component_type, weight_kg, material,
                           created_at, updated_at
                    FROM components ORDER BY id
                    ",
                )?;
                let rows = stmt.query_map([], row_to_component)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(components)
    }

    /// Fetch one component by id. `None` when no row matches.
    pub fn get(&self, id: i64) -> Result<Option<Component>, StoreError> {
        let component = self
            .conn
            .query_row(
                r"
                SELECT id, name, description, component_type, weight_kg, material,
                       created_at, updated_at
                FROM components WHERE id = ?1
                ",
                [id],
                row_to_component,
            )
            .optional()?;
        Ok(component)
    }

    /// Insert a new component; the store assigns the id and the current
    /// timestamps. Returns the full persisted record.
    pub fn insert(&self, input: &ComponentCreate) -> Result<Component, StoreError> {
        let now = Utc::now();
        self.conn.execute(
            r"
            INSERT INTO components
                (name, description, component_type, weight_kg, material, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
            params![
                input.name,
                input.description,
                input.component_type.as_str(),
                input.weight_kg,
                input.material,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "inserted component");
        Ok(Component {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            component_type: input.component_type,
            weight_kg: input.weight_kg,
            material: input.material.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply the provided fields to an existing component and bump
    /// `updated_at`. `None` when no row matches. An empty payload leaves
    /// the row untouched, `updated_at` included.
    pub fn update(
        &self,
        id: i64,
        input: &ComponentUpdate,
    ) -> Result<Option<Component>, StoreError> {
        let Some(current) = self.get(id)? else {
            return Ok(None);
        };
        if input.is_empty() {
            return Ok(Some(current));
        }

        let updated = Component {
            id: current.id,
            name: input.name.clone().unwrap_or(current.name),
            description: input.description.clone().or(current.description),
            component_type: input.component_type.unwrap_or(current.component_type),
            weight_kg: input.weight_kg.unwrap_or(current.weight_kg),
            material: input.material.clone().or(current.material),
            created_at: current.created_at,
            updated_at: Utc::now(),
        };
        self.conn.execute(
            r"
            UPDATE components
            SET name = ?1, description = ?2, component_type = ?3, weight_kg = ?4,
                material = ?5, updated_at = ?6
            WHERE id = ?7
            ",
            params![
                updated.name,
                updated.description,
                updated.component_type.as_str(),
                updated.weight_kg,
                updated.material,
                updated.updated_at.to_rfc3339(),
                id,
            ],
        )?;
        debug!(id, "updated component");
        Ok(Some(updated))
    }

    /// Delete one component by id. `false` when no row matched.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let affected = self
            .conn
            .execute("DELETE FROM components WHERE id = ?1", [id])?;
        if affected > 0 {
            debug!(id, "deleted component");
        }
        Ok(affected > 0)
    }
}

fn parse_timestamp(index: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                index,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

fn row_to_component(row: &rusqlite::Row) -> rusqlite::Result<Component> {
    let type_label: String = row.get(3)?;
    let component_type = ComponentType::parse(&type_label).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown component type: {type_label}").into(),
        )
    })?;
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;

    Ok(Component {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        component_type,
        weight_kg: row.get(4)?,
        material: row.get(5)?,
        created_at: parse_timestamp(6, &created_at)?,
        updated_at: parse_timestamp(7, &updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> ComponentStore {
        ComponentStore::open_in_memory().expect("failed to create test store")
    }

    fn wing(name: &str) -> ComponentCreate {
        ComponentCreate {
            name: name.to_string(),
            description: None,
            component_type: ComponentType::Wing,
            weight_kg: 120.5,
            material: Some("Aluminum".to_string()),
        }
    }

    #[test]
    fn insert_and_get() {
        let store = test_store();
        let created = store.insert(&wing("Main Wing")).unwrap();
        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = store.get(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn get_nonexistent_returns_none() {
        let store = test_store();
        assert!(store.get(99_999).unwrap().is_none());
    }

    #[test]
    fn list_empty_store() {
        let store = test_store();
        assert!(store.list(None).unwrap().is_empty());
    }

    #[test]
    fn list_returns_insertion_order() {
        let store = test_store();
        let a = store.insert(&wing("A")).unwrap();
        let b = store.insert(&wing("B")).unwrap();

        let all = store.list(None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, a.id);
        assert_eq!(all[1].id, b.id);
    }

    #[test]
    fn list_filters_by_type() {
        let store = test_store();
        store.insert(&wing("Port Wing")).unwrap();
        store
            .insert(&ComponentCreate {
                component_type: ComponentType::Engine,
                ..wing("Turbofan")
            })
            .unwrap();

        let engines = store.list(Some(ComponentType::Engine)).unwrap();
        assert_eq!(engines.len(), 1);
        assert_eq!(engines[0].name, "Turbofan");

        let avionics = store.list(Some(ComponentType::Avionics)).unwrap();
        assert!(avionics.is_empty());
    }

    #[test]
    fn update_applies_provided_fields_only() {
        let store = test_store();
        let created = store.insert(&wing("Main Wing")).unwrap();

        let updated = store
            .update(
                created.id,
                &ComponentUpdate {
                    weight_kg: Some(99.0),
                    ..ComponentUpdate::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.weight_kg, 99.0);
        assert_eq!(updated.name, "Main Wing");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        // The change is visible on a fresh read.
        let fetched = store.get(created.id).unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[test]
    fn update_nonexistent_returns_none() {
        let store = test_store();
        let result = store
            .update(
                42,
                &ComponentUpdate {
                    name: Some("Ghost".to_string()),
                    ..ComponentUpdate::default()
                },
            )
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn empty_update_leaves_row_untouched() {
        let store = test_store();
        let created = store.insert(&wing("Main Wing")).unwrap();

        let result = store
            .update(created.id, &ComponentUpdate::default())
            .unwrap()
            .unwrap();
        assert_eq!(result, created);
    }

    #[test]
    fn delete_removes_row() {
        let store = test_store();
        let created = store.insert(&wing("Main Wing")).unwrap();

        assert!(store.delete(created.id).unwrap());
        assert!(store.get(created.id).unwrap().is_none());
    }

    #[test]
    fn delete_nonexistent_returns_false() {
        let store = test_store();
        assert!(!store.delete(99_999).unwrap());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = test_store();
        let first = store.insert(&wing("First")).unwrap();
        store.delete(first.id).unwrap();

        let second = store.insert(&wing("Second")).unwrap();
        assert!(second.id > first.id);
    }
}
