use axum::{extract::{Query, State}, routing::get, Json, Router};

use super::AppState;
use crate::error::AppError;
use crate::models::{Profile, ProfileRequest, UserQuery, MAX_CYCLE_LENGTH};
use crate::store::Store;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/profile", get(get_profile).post(update_profile).put(update_profile))
        .with_state(state)
}

/// Returns the stored profile, creating the default one on first access.
pub(crate) async fn load_or_create(store: &dyn Store, user_id: &str) -> Result<Profile, AppError> {
    if let Some(profile) = store.get_profile(user_id).await? {
        return Ok(profile);
    }
    tracing::info!("🆕 Creating default profile for {}", user_id);
    Ok(store.upsert_profile(Profile::new_default(user_id)).await?)
}

fn validate(profile: &Profile) -> Result<(), AppError> {
    if profile.cycle_length <= 0 || profile.period_length <= 0 {
        return Err(AppError::BadRequest(
            "cycleLength and periodLength must be positive".into(),
        ));
    }
    if profile.cycle_length > MAX_CYCLE_LENGTH {
        return Err(AppError::BadRequest(format!(
            "cycleLength cannot exceed {} days",
            MAX_CYCLE_LENGTH
        )));
    }
    if profile.period_length >= profile.cycle_length {
        return Err(AppError::BadRequest(
            "periodLength must be shorter than cycleLength".into(),
        ));
    }
    if profile.age < 0 {
        return Err(AppError::BadRequest("age cannot be negative".into()));
    }
    Ok(())
}

async fn get_profile(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Profile>, AppError> {
    let profile = load_or_create(state.store.as_ref(), &query.user_id).await?;
    Ok(Json(profile))
}

async fn update_profile(
    State(state): State<AppState>,
    Json(body): Json<ProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    let mut profile = state
        .store
        .get_profile(&body.user_id)
        .await?
        .unwrap_or_else(|| Profile::new_default(&body.user_id));

    if let Some(name) = body.name {
        profile.name = name;
    }
    if let Some(age) = body.age {
        profile.age = age;
    }
    if let Some(cycle_length) = body.cycle_length {
        profile.cycle_length = cycle_length;
    }
    if let Some(period_length) = body.period_length {
        profile.period_length = period_length;
    }
    if let Some(last_period_date) = body.last_period_date {
        profile.last_period_date = last_period_date;
    }

    validate(&profile)?;
    let saved = state.store.upsert_profile(profile).await?;
    Ok(Json(saved))
}
