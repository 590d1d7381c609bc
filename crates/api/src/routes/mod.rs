//! Resource Routes
//!
//! Create, update and delete share one generic implementation per entity
//! kind; each resource module provides its own filtered `list`.

pub mod categories;
pub mod habits;
pub mod users;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use storage::{Collection, Entity, EntityId};

use crate::{ApiError, SharedState};

/// Query parameters for delete
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: EntityId,
}

/// Response for delete
#[derive(Debug, Serialize)]
pub struct DeleteResponse<T> {
    pub status: u16,
    pub message: String,
    /// The record as it was before removal
    pub data: T,
}

/// Count an operation outcome for `/metrics`
pub(crate) fn record<T: Entity, R>(op: &'static str, result: &Result<R, ApiError>) {
    let outcome = if result.is_ok() { "ok" } else { "error" };
    metrics::counter!(
        "habits_api_operations_total",
        "resource" => T::RESOURCE,
        "op" => op,
        "outcome" => outcome
    )
    .increment(1);
}

/// Insert a batch; responds with the last created record
pub async fn create<T>(
    State(state): State<SharedState>,
    payload: Result<Json<Vec<T>>, JsonRejection>,
) -> Result<Json<T>, ApiError>
where
    T: Collection + Serialize + DeserializeOwned,
{
    let result = payload.map_err(ApiError::from).and_then(|Json(batch)| {
        let mut created = state.repository.store::<T>().create(batch)?;
        // `create` rejects empty batches, so the error arm is unreachable
        debug_assert!(!created.is_empty());
        created
            .pop()
            .map(Json)
            .ok_or_else(|| ApiError::Internal(format!("empty {} batch accepted", T::RESOURCE)))
    });
    record::<T, _>("create", &result);
    result
}

/// Overwrite an existing record
pub async fn update<T>(
    State(state): State<SharedState>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Json<T>, ApiError>
where
    T: Collection + Serialize + DeserializeOwned,
{
    let result = payload.map_err(ApiError::from).and_then(|Json(entity)| {
        let updated = state.repository.store::<T>().update(entity)?;
        Ok(Json(updated))
    });
    record::<T, _>("update", &result);
    result
}

/// Remove a record by id
pub async fn delete<T>(
    State(state): State<SharedState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<DeleteResponse<T>>, ApiError>
where
    T: Collection + Serialize,
{
    let result = query.map_err(ApiError::from).and_then(|Query(params)| {
        let removed = state.repository.store::<T>().delete(params.id)?;
        Ok(Json(DeleteResponse {
            status: StatusCode::OK.as_u16(),
            message: format!("{} with id {} deleted", T::KIND, params.id),
            data: removed,
        }))
    });
    record::<T, _>("delete", &result);
    result
}
