use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use super::AppState;
use crate::error::AppError;
use crate::models::{CycleStats, UserQuery};
use crate::stats::calculate_cycle_stats;

pub async fn get_cycle_stats(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<CycleStats>, AppError> {
    let logs = state.store.list_period_logs(&query.user_id).await?;
    Ok(Json(calculate_cycle_stats(&logs)))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/cycle/stats", get(get_cycle_stats))
        .with_state(state)
}
