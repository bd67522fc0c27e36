//! Resolved entity model: catalog validated and flattened for runtime use.

use crate::config::{ColumnKind, Operation, ValidationRule};
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ColumnKind,
    pub nullable: bool,
    pub is_pk: bool,
    pub validation: ValidationRule,
}

#[derive(Clone, Debug)]
pub struct ResolvedEntity {
    pub entity_id: String,
    pub table_name: String,
    pub path_segment: String,
    pub display_name: String,
    pub pk_column: String,
    /// All columns in catalog order, primary key included.
    pub columns: Vec<ColumnInfo>,
    pub operations: Vec<Operation>,
    /// Columns PATCH may set, in catalog order.
    pub patchable: Vec<String>,
}

impl ResolvedEntity {
    pub fn allows(&self, op: Operation) -> bool {
        self.operations.contains(&op)
    }

    /// Non-key columns, the ones request bodies can write.
    pub fn writable_columns(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter().filter(|c| !c.is_pk)
    }

    pub fn patchable_columns(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.writable_columns()
            .filter(move |c| self.patchable.iter().any(|p| *p == c.name))
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedModel {
    pub entities: Vec<ResolvedEntity>,
    pub entity_by_path: HashMap<String, ResolvedEntity>,
}

impl ResolvedModel {
    pub fn entity_by_path(&self, path: &str) -> Option<&ResolvedEntity> {
        self.entity_by_path.get(path)
    }
}
