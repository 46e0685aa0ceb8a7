use axum::{Router, routing::get, Json, extract::{State, Query}};
use chrono::NaiveDate;
use serde::Deserialize;

use super::AppState;
use crate::cycle::{is_in_fertile_window, predict_next_period, NO_PREDICTION_HINT};
use crate::error::AppError;
use crate::models::{default_user, CycleSummary, Profile};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleQuery {
    #[serde(default = "default_user")]
    pub user_id: String,
    /// Evaluate as of this day instead of today (UTC).
    pub as_of: Option<NaiveDate>,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/cycle", get(get_cycle_summary))
        .with_state(state)
}

async fn get_cycle_summary(
    State(state): State<AppState>,
    Query(params): Query<CycleQuery>,
) -> Result<Json<CycleSummary>, AppError> {
    let profile = state
        .store
        .get_profile(&params.user_id)
        .await?
        .unwrap_or_else(|| Profile::new_default(&params.user_id));
    let logs = state.store.list_period_logs(&params.user_id).await?;

    let today = params
        .as_of
        .unwrap_or_else(|| chrono::Utc::now().naive_utc().date());

    let prediction = predict_next_period(&profile, &logs, today)?;

    let in_fertile_window = prediction
        .as_ref()
        .and_then(|p| p.fertility_window.as_ref())
        .map_or(false, |window| is_in_fertile_window(today, window));

    let phase_description = prediction
        .as_ref()
        .map_or(NO_PREDICTION_HINT, |p| p.phase.description())
        .to_string();
    let phase_color = prediction.as_ref().map(|p| p.phase.color());

    Ok(Json(CycleSummary {
        prediction,
        in_fertile_window,
        phase_description,
        phase_color,
    }))
}
