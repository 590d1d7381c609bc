//! Category Routes

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use storage::{Category, CategoryFilter, EntityId};

use super::record;
use crate::{ApiError, SharedState};

/// Query parameters for the categories list
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub id: Option<EntityId>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// List categories
pub async fn list(
    State(state): State<SharedState>,
    query: Result<Query<CategoryQuery>, QueryRejection>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let result = query.map_err(ApiError::from).and_then(|Query(params)| {
        let filter = CategoryFilter { id: params.id };
        let page = state.page(params.limit, params.offset);
        Ok(Json(state.repository.categories().list(&filter, page)?))
    });
    record::<Category, _>("list", &result);
    result
}
