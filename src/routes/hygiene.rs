use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use super::AppState;
use crate::error::AppError;
use crate::models::{HygieneReminder, NewReminder, UpdateReminder, UserQuery, MAX_REMINDER_INTERVAL};
use crate::reminders::{default_reminders, is_due};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/hygiene", get(list_reminders).post(create_reminder))
        .route("/hygiene/due", get(due_reminders))
        .route("/hygiene/:id", put(update_reminder).delete(delete_reminder))
        .route("/hygiene/:id/ack", post(ack_reminder))
        .with_state(state)
}

fn reminder_not_found() -> AppError {
    AppError::NotFound("Reminder not found".into())
}

fn check_interval(hours: u32) -> Result<(), AppError> {
    if hours == 0 {
        return Err(AppError::BadRequest("interval must be at least one hour".into()));
    }
    if hours > MAX_REMINDER_INTERVAL {
        return Err(AppError::BadRequest(format!(
            "interval cannot exceed {} hours",
            MAX_REMINDER_INTERVAL
        )));
    }
    Ok(())
}

/// Lists a user's reminders, seeding the starter set if they never had any.
async fn reminders_for(state: &AppState, user_id: &str) -> Result<Vec<HygieneReminder>, AppError> {
    if state
        .store
        .seed_reminders(user_id, default_reminders(user_id))
        .await?
    {
        tracing::info!("🧼 Seeded default reminders for {}", user_id);
    }
    Ok(state.store.list_reminders(user_id).await?)
}

async fn list_reminders(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<HygieneReminder>>, AppError> {
    Ok(Json(reminders_for(&state, &query.user_id).await?))
}

async fn due_reminders(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<HygieneReminder>>, AppError> {
    let now = Utc::now();
    let due = reminders_for(&state, &query.user_id)
        .await?
        .into_iter()
        .filter(|r| is_due(r, now))
        .collect();
    Ok(Json(due))
}

async fn create_reminder(
    State(state): State<AppState>,
    Json(body): Json<NewReminder>,
) -> Result<(StatusCode, Json<HygieneReminder>), AppError> {
    check_interval(body.interval)?;
    let reminder = HygieneReminder {
        id: Uuid::new_v4(),
        user_id: body.user_id,
        title: body.title,
        description: body.description,
        interval: body.interval,
        enabled: body.enabled,
        last_reminded: None,
    };
    let saved = state.store.insert_reminder(reminder).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_reminder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateReminder>,
) -> Result<Json<HygieneReminder>, AppError> {
    let mut reminder = state.store.get_reminder(id).await?.ok_or_else(reminder_not_found)?;

    if let Some(title) = patch.title {
        reminder.title = title;
    }
    if let Some(description) = patch.description {
        reminder.description = description;
    }
    if let Some(interval) = patch.interval {
        check_interval(interval)?;
        reminder.interval = interval;
    }
    if let Some(enabled) = patch.enabled {
        reminder.enabled = enabled;
    }

    let updated = state
        .store
        .update_reminder(reminder)
        .await?
        .ok_or_else(reminder_not_found)?;
    Ok(Json(updated))
}

async fn ack_reminder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HygieneReminder>, AppError> {
    let mut reminder = state.store.get_reminder(id).await?.ok_or_else(reminder_not_found)?;
    reminder.last_reminded = Some(Utc::now());
    let updated = state
        .store
        .update_reminder(reminder)
        .await?
        .ok_or_else(reminder_not_found)?;
    Ok(Json(updated))
}

async fn delete_reminder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !state.store.delete_reminder(id).await? {
        return Err(reminder_not_found());
    }
    Ok(Json(json!({ "message": "Reminder deleted successfully" })))
}
