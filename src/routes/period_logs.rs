use axum::{
    Router,
    routing::{get, put},
    extract::{Path, State, Query},
    Json,
    http::StatusCode,
};
use serde_json::{json, Value};
use uuid::Uuid;

use super::AppState;
use crate::error::AppError;
use crate::models::{NewPeriodLog, PeriodLog, UpdatePeriodLog, UserQuery, MAX_PAIN};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/period-logs", get(list_logs).post(create_log))
        .route("/period-logs/:id", put(update_log).delete(delete_log))
        .with_state(state)
}

fn check_pain(pain: u8) -> Result<(), AppError> {
    if pain > MAX_PAIN {
        return Err(AppError::BadRequest(format!(
            "pain must be between 0 and {}, got {}",
            MAX_PAIN, pain
        )));
    }
    Ok(())
}

async fn list_logs(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<PeriodLog>>, AppError> {
    let logs = state.store.list_period_logs(&query.user_id).await?;
    Ok(Json(logs))
}

async fn create_log(
    State(state): State<AppState>,
    Json(body): Json<NewPeriodLog>,
) -> Result<(StatusCode, Json<PeriodLog>), AppError> {
    check_pain(body.pain)?;

    let log = PeriodLog {
        id: Uuid::new_v4(),
        user_id: body.user_id,
        date: body.date,
        flow: body.flow,
        pain: body.pain,
        mood: body.mood,
        symptoms: body.symptoms,
        notes: body.notes,
    };

    let saved = state.store.insert_period_log(log).await?;
    tracing::info!("🩸 Logged {} for {}", saved.date, saved.user_id);
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdatePeriodLog>,
) -> Result<Json<PeriodLog>, AppError> {
    let not_found = || AppError::NotFound("Period log not found".into());

    let mut log = state.store.get_period_log(id).await?.ok_or_else(not_found)?;

    if let Some(date) = patch.date {
        log.date = date;
    }
    if let Some(flow) = patch.flow {
        log.flow = flow;
    }
    if let Some(pain) = patch.pain {
        check_pain(pain)?;
        log.pain = pain;
    }
    if let Some(mood) = patch.mood {
        log.mood = mood;
    }
    if let Some(symptoms) = patch.symptoms {
        log.symptoms = symptoms;
    }
    if let Some(notes) = patch.notes {
        log.notes = notes;
    }

    let updated = state.store.update_period_log(log).await?.ok_or_else(not_found)?;
    Ok(Json(updated))
}

async fn delete_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !state.store.delete_period_log(id).await? {
        return Err(AppError::NotFound("Period log not found".into()));
    }
    Ok(Json(json!({ "message": "Period log deleted successfully" })))
}
