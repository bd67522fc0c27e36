//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from a resolved entity.

use crate::config::ResolvedEntity;
use crate::sql::{ColumnValues, SqlValue};

/// Quote identifier for SQLite (safe: only from the catalog).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlValue) {
        self.params.push(v);
    }
}

fn select_column_list(entity: &ResolvedEntity) -> String {
    entity
        .columns
        .iter()
        .map(|c| quoted(&c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row, ordered by primary key (rowid order for INTEGER PRIMARY KEY tables).
pub fn select_list(entity: &ResolvedEntity) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(entity),
        quoted(&entity.table_name),
        quoted(&entity.pk_column)
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(entity: &ResolvedEntity, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(SqlValue::Integer(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ?",
        select_column_list(entity),
        quoted(&entity.table_name),
        quoted(&entity.pk_column)
    );
    q
}

/// INSERT the given columns; the key is generated by the store. RETURNING the full row.
pub fn insert(entity: &ResolvedEntity, values: &ColumnValues) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(values.len());
    for (name, v) in values {
        if *name == entity.pk_column {
            continue;
        }
        cols.push(quoted(name));
        q.push_param(v.clone());
    }
    let table = quoted(&entity.table_name);
    let returning = select_column_list(entity);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning)
    } else {
        let placeholders = vec!["?"; cols.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            table,
            cols.join(", "),
            placeholders,
            returning
        )
    };
    q
}

/// UPDATE by id: SET exactly the given columns. RETURNING the full row, so a missing id yields no row.
/// Callers must pass at least one column.
pub fn update(entity: &ResolvedEntity, id: i64, values: &ColumnValues) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(values.len());
    for (name, v) in values {
        if *name == entity.pk_column {
            continue;
        }
        sets.push(format!("{} = ?", quoted(name)));
        q.push_param(v.clone());
    }
    q.push_param(SqlValue::Integer(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ? RETURNING {}",
        quoted(&entity.table_name),
        sets.join(", "),
        quoted(&entity.pk_column),
        select_column_list(entity)
    );
    q
}

/// DELETE by id.
pub fn delete(entity: &ResolvedEntity, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(SqlValue::Integer(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        quoted(&entity.table_name),
        quoted(&entity.pk_column)
    );
    q
}
