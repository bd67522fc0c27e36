//! Catalog validation: referential integrity and API consistency.

use crate::config::{Catalog, ColumnKind, EntityConfig};
use crate::error::ConfigError;
use std::collections::HashSet;

pub fn validate(catalog: &Catalog) -> Result<(), ConfigError> {
    if catalog.entities.is_empty() {
        return Err(ConfigError::Validation("at least one entity required".into()));
    }

    let mut path_segments = HashSet::new();
    let mut tables = HashSet::new();
    for entity in &catalog.entities {
        if !path_segments.insert(entity.path_segment.as_str()) {
            return Err(ConfigError::DuplicatePathSegment(entity.path_segment.clone()));
        }
        if !tables.insert(entity.table.as_str()) {
            return Err(ConfigError::DuplicateTable(entity.table.clone()));
        }
        validate_entity(entity)?;
    }
    Ok(())
}

fn validate_entity(entity: &EntityConfig) -> Result<(), ConfigError> {
    let mut names = HashSet::new();
    for c in &entity.columns {
        if !names.insert(c.name.as_str()) {
            return Err(ConfigError::DuplicateColumn {
                entity_id: entity.id.clone(),
                column: c.name.clone(),
            });
        }
        if c.validation.allowed.is_some() && c.kind != ColumnKind::Text {
            return Err(ConfigError::Validation(format!(
                "{}.{}: allowed values only apply to text columns",
                entity.id, c.name
            )));
        }
        if c.validation.minimum.is_some() && c.kind == ColumnKind::Text {
            return Err(ConfigError::Validation(format!(
                "{}.{}: minimum only applies to numeric columns",
                entity.id, c.name
            )));
        }
    }

    let pk = entity.columns.iter().find(|c| c.name == entity.primary_key);
    match pk {
        Some(c) if c.kind == ColumnKind::Integer && !c.nullable => {}
        _ => {
            return Err(ConfigError::InvalidPrimaryKey {
                entity_id: entity.id.clone(),
                column: entity.primary_key.clone(),
            })
        }
    }

    if let Some(patchable) = &entity.patchable {
        for col in patchable {
            if *col == entity.primary_key || !names.contains(col.as_str()) {
                return Err(ConfigError::MissingReference {
                    kind: "patchable column",
                    id: format!("{}.{}", entity.id, col),
                });
            }
        }
    }

    if entity.operations.is_empty() {
        return Err(ConfigError::Validation(format!("{}: no operations enabled", entity.id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColumnConfig, Operation, ValidationRule};

    fn column(name: &str, kind: ColumnKind) -> ColumnConfig {
        ColumnConfig {
            name: name.into(),
            kind,
            nullable: false,
            validation: ValidationRule::default(),
        }
    }

    fn entity(path: &str, table: &str) -> EntityConfig {
        EntityConfig {
            id: table.trim_end_matches('s').into(),
            table: table.into(),
            path_segment: path.into(),
            display_name: "Thing".into(),
            primary_key: "id".into(),
            columns: vec![column("id", ColumnKind::Integer), column("name", ColumnKind::Text)],
            operations: vec![Operation::List],
            patchable: None,
        }
    }

    #[test]
    fn accepts_minimal_entity() {
        let catalog = Catalog { entities: vec![entity("things", "things")] };
        assert!(validate(&catalog).is_ok());
    }

    #[test]
    fn rejects_duplicate_path_segment() {
        let catalog = Catalog {
            entities: vec![entity("things", "things"), entity("things", "others")],
        };
        assert!(matches!(validate(&catalog), Err(ConfigError::DuplicatePathSegment(p)) if p == "things"));
    }

    #[test]
    fn rejects_text_primary_key() {
        let mut e = entity("things", "things");
        e.columns[0].kind = ColumnKind::Text;
        let catalog = Catalog { entities: vec![e] };
        assert!(matches!(validate(&catalog), Err(ConfigError::InvalidPrimaryKey { .. })));
    }

    #[test]
    fn rejects_unknown_patchable_column() {
        let mut e = entity("things", "things");
        e.patchable = Some(vec!["colour".into()]);
        let catalog = Catalog { entities: vec![e] };
        assert!(matches!(validate(&catalog), Err(ConfigError::MissingReference { .. })));
    }

    #[test]
    fn rejects_allowed_values_on_numeric_column() {
        let mut e = entity("things", "things");
        let mut qty = column("qty", ColumnKind::Integer);
        qty.validation.allowed = Some(vec!["1".into()]);
        e.columns.push(qty);
        let catalog = Catalog { entities: vec![e] };
        assert!(matches!(validate(&catalog), Err(ConfigError::Validation(_))));
    }
}
