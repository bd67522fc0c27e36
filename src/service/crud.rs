//! Generic CRUD execution against SQLite.

use crate::config::{ColumnInfo, ColumnKind, ResolvedEntity};
use crate::error::AppError;
use crate::sql::{bind_all, delete, insert, select_by_id, select_list, update, ColumnValues, QueryBuf};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

pub struct CrudService;

impl CrudService {
    /// All rows in natural storage order.
    pub async fn list(pool: &SqlitePool, entity: &ResolvedEntity) -> Result<Vec<Value>, AppError> {
        let q = select_list(entity);
        Self::query_many(pool, entity, &q).await
    }

    /// Fetch one row by primary key. Returns JSON object or None.
    pub async fn read(pool: &SqlitePool, entity: &ResolvedEntity, id: i64) -> Result<Option<Value>, AppError> {
        let q = select_by_id(entity, id);
        Self::query_optional(pool, entity, &q).await
    }

    /// Insert one row from validated values. Returns the created row with its generated id.
    pub async fn create(pool: &SqlitePool, entity: &ResolvedEntity, values: &ColumnValues) -> Result<Value, AppError> {
        let q = insert(entity, values);
        Self::query_optional(pool, entity, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    /// Overwrite every writable column of one row. None when the id does not exist.
    pub async fn replace(
        pool: &SqlitePool,
        entity: &ResolvedEntity,
        id: i64,
        values: &ColumnValues,
    ) -> Result<Option<Value>, AppError> {
        let q = update(entity, id, values);
        Self::query_optional(pool, entity, &q).await
    }

    /// Update only the given columns of one row. None when the id does not exist.
    pub async fn patch(
        pool: &SqlitePool,
        entity: &ResolvedEntity,
        id: i64,
        changes: &ColumnValues,
    ) -> Result<Option<Value>, AppError> {
        if changes.is_empty() {
            return Err(AppError::Validation("No fields to update".into()));
        }
        let q = update(entity, id, changes);
        Self::query_optional(pool, entity, &q).await
    }

    /// Delete one row by id. Returns whether a row was removed.
    pub async fn delete(pool: &SqlitePool, entity: &ResolvedEntity, id: i64) -> Result<bool, AppError> {
        let q = delete(entity, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let result = bind_all(sqlx::query(&q.sql), &q.params).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn query_optional(
        pool: &SqlitePool,
        entity: &ResolvedEntity,
        q: &QueryBuf,
    ) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query(&q.sql), &q.params).fetch_optional(pool).await?;
        Ok(row.map(|r| row_to_json(&r, entity)))
    }

    async fn query_many(pool: &SqlitePool, entity: &ResolvedEntity, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query(&q.sql), &q.params).fetch_all(pool).await?;
        Ok(rows.iter().map(|r| row_to_json(r, entity)).collect())
    }
}

fn row_to_json(row: &SqliteRow, entity: &ResolvedEntity) -> Value {
    let mut map = serde_json::Map::new();
    for col in &entity.columns {
        map.insert(col.name.clone(), cell_to_value(row, col));
    }
    Value::Object(map)
}

/// Decode by the catalog kind first; fall back through the other storage classes since
/// SQLite only enforces column affinity, not type.
fn cell_to_value(row: &SqliteRow, col: &ColumnInfo) -> Value {
    use sqlx::Row;
    let name = col.name.as_str();
    match col.kind {
        ColumnKind::Integer => {
            if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
                return Value::Number(n.into());
            }
        }
        ColumnKind::Real => {
            if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
                if let Some(n) = serde_json::Number::from_f64(n) {
                    return Value::Number(n);
                }
            }
        }
        ColumnKind::Text => {
            if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
                return Value::String(s);
            }
        }
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    Value::Null
}
