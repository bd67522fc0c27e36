//! Request validation from catalog rules. Produces typed column values ready for binding.

use crate::config::{ColumnInfo, ColumnKind, ResolvedEntity};
use crate::error::AppError;
use crate::sql::{ColumnValues, SqlValue};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a full body (create, replace). Every required column must be present; optional
    /// columns that are absent are written as NULL.
    pub fn validate(body: &Map<String, Value>, entity: &ResolvedEntity) -> Result<ColumnValues, AppError> {
        let mut out = Vec::new();
        for col in entity.writable_columns() {
            let value = match present(body, col) {
                Some(v) => coerce(col, v)?,
                None if col.validation.required || !col.nullable => {
                    return Err(required(col));
                }
                None => SqlValue::Null,
            };
            out.push((col.name.clone(), value));
        }
        Ok(out)
    }

    /// Validate only the patchable fields present in body (PATCH). Missing keys and nulls on
    /// non-nullable columns are absent; an explicit null clears a nullable column.
    pub fn validate_partial(body: &Map<String, Value>, entity: &ResolvedEntity) -> Result<ColumnValues, AppError> {
        let mut out = Vec::new();
        for col in entity.patchable_columns() {
            match body.get(&col.name) {
                None => continue,
                Some(Value::Null) if col.nullable && !col.validation.required => {
                    out.push((col.name.clone(), SqlValue::Null));
                }
                Some(Value::Null) => continue,
                Some(v) => out.push((col.name.clone(), coerce(col, v)?)),
            }
        }
        if out.is_empty() {
            return Err(AppError::Validation("No fields to update".into()));
        }
        Ok(out)
    }
}

fn present<'a>(body: &'a Map<String, Value>, col: &ColumnInfo) -> Option<&'a Value> {
    body.get(&col.name).filter(|v| !v.is_null())
}

fn required(col: &ColumnInfo) -> AppError {
    AppError::Validation(format!("{} is required", col.name))
}

fn coerce(col: &ColumnInfo, v: &Value) -> Result<SqlValue, AppError> {
    match col.kind {
        ColumnKind::Text => coerce_text(col, v),
        ColumnKind::Integer => {
            let n = match v {
                Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_number)),
                Value::String(s) if s.trim().is_empty() && col.validation.required => return Err(required(col)),
                Value::String(s) => {
                    let s = s.trim();
                    s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().and_then(whole_number))
                }
                _ => None,
            };
            let n = n.ok_or_else(|| AppError::Validation(format!("{} must be an integer", col.name)))?;
            check_minimum(col, n as f64)?;
            Ok(SqlValue::Integer(n))
        }
        ColumnKind::Real => {
            let f = match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) if s.trim().is_empty() && col.validation.required => return Err(required(col)),
                Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
                _ => None,
            };
            let f = f.ok_or_else(|| AppError::Validation(format!("{} must be a number", col.name)))?;
            check_minimum(col, f)?;
            Ok(SqlValue::Real(f))
        }
    }
}

/// `5.0` counts as the integer 5; fractions and out-of-range values do not.
fn whole_number(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

fn coerce_text(col: &ColumnInfo, v: &Value) -> Result<SqlValue, AppError> {
    let Value::String(s) = v else {
        return Err(AppError::Validation(format!("{} must be a string", col.name)));
    };
    if col.validation.required && s.trim().is_empty() {
        return Err(required(col));
    }
    if let Some(allowed) = &col.validation.allowed {
        if !allowed.iter().any(|a| a == s) {
            return Err(AppError::Validation(format!(
                "{} must be one of: {}",
                col.name,
                allowed.join(", ")
            )));
        }
    }
    Ok(SqlValue::Text(s.clone()))
}

fn check_minimum(col: &ColumnInfo, n: f64) -> Result<(), AppError> {
    if let Some(min) = col.validation.minimum {
        if n < min {
            return Err(AppError::Validation(format!("{} must be at least {}", col.name, min)));
        }
    }
    Ok(())
}
