//! Entity CRUD handlers: list, read, create, replace, patch, delete.

use crate::config::{Operation, ResolvedEntity};
use crate::error::AppError;
use crate::service::{CrudService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

fn entity_for<'a>(state: &'a AppState, path_segment: &str, op: Operation) -> Result<&'a ResolvedEntity, AppError> {
    let entity = state
        .model
        .entity_by_path(path_segment)
        .ok_or_else(|| AppError::NotFound("Resource not found".into()))?;
    if !entity.allows(op) {
        return Err(AppError::BadRequest(format!("{} not allowed", op.as_str())));
    }
    Ok(entity)
}

/// Ids are store-generated integers; anything else cannot match a row.
fn parse_id(id_str: &str, entity: &ResolvedEntity) -> Result<i64, AppError> {
    id_str.trim().parse().map_err(|_| AppError::not_found(&entity.display_name))
}

fn body_to_map(payload: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, AppError> {
    let Json(value) = payload?;
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let entity = entity_for(&state, &path_segment, Operation::List)?;
    let rows = CrudService::list(&state.pool, entity).await?;
    Ok((StatusCode::OK, Json(rows)))
}

pub async fn read(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let entity = entity_for(&state, &path_segment, Operation::Read)?;
    let id = parse_id(&id_str, entity)?;
    let row = CrudService::read(&state.pool, entity, id)
        .await?
        .ok_or_else(|| AppError::not_found(&entity.display_name))?;
    Ok((StatusCode::OK, Json(row)))
}

pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let entity = entity_for(&state, &path_segment, Operation::Create)?;
    let body = body_to_map(payload)?;
    let values = RequestValidator::validate(&body, entity)?;
    let row = CrudService::create(&state.pool, entity, &values).await?;
    tracing::info!(entity = %entity.entity_id, id = ?row.get(&entity.pk_column), "created");
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn replace(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let entity = entity_for(&state, &path_segment, Operation::Replace)?;
    let body = body_to_map(payload)?;
    let values = RequestValidator::validate(&body, entity)?;
    let id = parse_id(&id_str, entity)?;
    let row = CrudService::replace(&state.pool, entity, id, &values)
        .await?
        .ok_or_else(|| AppError::not_found(&entity.display_name))?;
    Ok((StatusCode::OK, Json(row)))
}

pub async fn patch(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let entity = entity_for(&state, &path_segment, Operation::Patch)?;
    let body = body_to_map(payload)?;
    let changes = RequestValidator::validate_partial(&body, entity)?;
    let id = parse_id(&id_str, entity)?;
    let row = CrudService::patch(&state.pool, entity, id, &changes)
        .await?
        .ok_or_else(|| AppError::not_found(&entity.display_name))?;
    Ok((StatusCode::OK, Json(row)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let entity = entity_for(&state, &path_segment, Operation::Delete)?;
    let id = parse_id(&id_str, entity)?;
    if !CrudService::delete(&state.pool, entity, id).await? {
        return Err(AppError::not_found(&entity.display_name));
    }
    tracing::info!(entity = %entity.entity_id, id, "deleted");
    Ok(StatusCode::NO_CONTENT)
}
