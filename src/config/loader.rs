//! Load the entity catalog (embedded JSON) and resolve it into the runtime model.

use crate::config::resolved::{ColumnInfo, ResolvedEntity, ResolvedModel};
use crate::config::{validate, Catalog};
use crate::error::ConfigError;
use std::collections::HashMap;

const BUILTIN_CATALOG: &str = include_str!("catalog.json");

/// Parse the catalog compiled into the binary (books, orders, customers).
pub fn load_catalog() -> Result<Catalog, ConfigError> {
    load_catalog_from_str(BUILTIN_CATALOG)
}

pub fn load_catalog_from_str(json: &str) -> Result<Catalog, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Load(e.to_string()))
}

/// Build resolved model from catalog (validates first).
pub fn resolve(catalog: &Catalog) -> Result<ResolvedModel, ConfigError> {
    validate(catalog)?;

    let mut entities = Vec::with_capacity(catalog.entities.len());
    let mut entity_by_path = HashMap::new();

    for e in &catalog.entities {
        let columns: Vec<ColumnInfo> = e
            .columns
            .iter()
            .map(|c| ColumnInfo {
                name: c.name.clone(),
                kind: c.kind,
                nullable: c.nullable,
                is_pk: c.name == e.primary_key,
                validation: c.validation.clone(),
            })
            .collect();
        let patchable = match &e.patchable {
            Some(list) => columns
                .iter()
                .filter(|c| list.contains(&c.name))
                .map(|c| c.name.clone())
                .collect(),
            None => columns
                .iter()
                .filter(|c| !c.is_pk)
                .map(|c| c.name.clone())
                .collect(),
        };

        let resolved = ResolvedEntity {
            entity_id: e.id.clone(),
            table_name: e.table.clone(),
            path_segment: e.path_segment.clone(),
            display_name: e.display_name.clone(),
            pk_column: e.primary_key.clone(),
            columns,
            operations: e.operations.clone(),
            patchable,
        };
        entity_by_path.insert(resolved.path_segment.clone(), resolved.clone());
        entities.push(resolved);
    }

    tracing::debug!(entities = entities.len(), "catalog resolved");
    Ok(ResolvedModel {
        entities,
        entity_by_path,
    })
}

/// Load and resolve the built-in catalog in one step.
pub fn bookstore_model() -> Result<ResolvedModel, ConfigError> {
    resolve(&load_catalog()?)
}
