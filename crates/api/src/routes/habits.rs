//! Habit Routes

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use storage::{EntityId, Habit, HabitFilter};

use super::record;
use crate::{ApiError, SharedState};

/// Query parameters for the habits list
///
/// All set filters must match.
#[derive(Debug, Deserialize)]
pub struct HabitQuery {
    pub id: Option<EntityId>,
    /// Filter by owning user
    pub user_id: Option<EntityId>,
    /// Filter by category
    pub category_id: Option<EntityId>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// List habits
pub async fn list(
    State(state): State<SharedState>,
    query: Result<Query<HabitQuery>, QueryRejection>,
) -> Result<Json<Vec<Habit>>, ApiError> {
    let result = query.map_err(ApiError::from).and_then(|Query(params)| {
        let filter = HabitFilter {
            id: params.id,
            user_id: params.user_id,
            category_id: params.category_id,
        };
        let page = state.page(params.limit, params.offset);
        Ok(Json(state.repository.habits().list(&filter, page)?))
    });
    record::<Habit, _>("list", &result);
    result
}
