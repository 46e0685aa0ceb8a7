use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::AppState;
use crate::chatbot::{self, BotReply};
use crate::error::AppError;
use crate::models::{ChatMessage, ChatRequest, Role, UserQuery};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/chat/history", get(get_history).delete(clear_history))
        .route("/chat/message", post(send_message))
        .with_state(state)
}

async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    Ok(Json(state.store.chat_history(&query.user_id).await?))
}

/// History is best effort; a failed write never fails the reply.
async fn remember(state: &AppState, message: ChatMessage) {
    if let Err(e) = state.store.append_chat_message(message).await {
        tracing::warn!("⚠️ Could not save chat message: {}", e);
    }
}

async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<BotReply>, AppError> {
    if body.message.trim().is_empty() {
        return Err(AppError::BadRequest("message cannot be empty".into()));
    }

    remember(&state, ChatMessage::new(&body.user_id, Role::User, body.message.as_str())).await;

    let reply = chatbot::reply(&body.message);
    remember(&state, ChatMessage::new(&body.user_id, Role::Assistant, reply.history_text())).await;

    Ok(Json(reply))
}

async fn clear_history(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Value>, AppError> {
    let removed = state.store.clear_chat_history(&query.user_id).await?;
    tracing::info!("🧹 Cleared {} chat messages for {}", removed, query.user_id);
    Ok(Json(json!({ "message": "Chat history cleared successfully" })))
}
