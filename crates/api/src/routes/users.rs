//! User Routes

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use storage::{EntityId, User, UserFilter};

use super::record;
use crate::{ApiError, SharedState};

/// Query parameters for the users list
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    /// Filter by id
    pub id: Option<EntityId>,
    /// Maximum number of records
    pub limit: Option<usize>,
    /// Records to skip
    pub offset: Option<usize>,
}

/// List users
pub async fn list(
    State(state): State<SharedState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<Vec<User>>, ApiError> {
    let result = query.map_err(ApiError::from).and_then(|Query(params)| {
        let filter = UserFilter { id: params.id };
        let page = state.page(params.limit, params.offset);
        Ok(Json(state.repository.users().list(&filter, page)?))
    });
    record::<User, _>("list", &result);
    result
}
