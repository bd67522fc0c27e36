//! Provision missing tables from the resolved model: CREATE TABLE IF NOT EXISTS with NOT NULL
//! and CHECK constraints derived from the catalog rules. Existing tables are left as they are.

use crate::config::{ColumnInfo, ResolvedEntity, ResolvedModel};
use crate::error::AppError;
use crate::sql::quoted;
use sqlx::SqlitePool;

pub async fn apply_migrations(pool: &SqlitePool, model: &ResolvedModel) -> Result<(), AppError> {
    for entity in &model.entities {
        let ddl = create_table_sql(entity);
        tracing::debug!(sql = %ddl, "migration");
        sqlx::query(&ddl).execute(pool).await?;
        tracing::info!(table = %entity.table_name, "table ensured");
    }
    Ok(())
}

pub fn create_table_sql(entity: &ResolvedEntity) -> String {
    let col_defs: Vec<String> = entity.columns.iter().map(column_def).collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(&entity.table_name),
        col_defs.join(", ")
    )
}

fn column_def(c: &ColumnInfo) -> String {
    let name = quoted(&c.name);
    if c.is_pk {
        return format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", name);
    }
    let mut def = format!("{} {}", name, c.kind.sql_type());
    if !c.nullable {
        def.push_str(" NOT NULL");
    }
    if let Some(min) = c.validation.minimum {
        def.push_str(&format!(" CHECK ({} >= {})", name, min));
    }
    if let Some(allowed) = &c.validation.allowed {
        let values: Vec<String> = allowed
            .iter()
            .map(|v| format!("'{}'", v.replace('\'', "''")))
            .collect();
        def.push_str(&format!(" CHECK ({} IN ({}))", name, values.join(", ")));
    }
    def
}
