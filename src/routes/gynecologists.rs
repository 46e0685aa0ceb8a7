use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::directory;
use crate::error::AppError;
use crate::models::Gynecologist;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryQuery {
    pub q: Option<String>,
    pub area: Option<String>,
    pub min_rating: Option<f32>,
}

pub fn routes() -> Router {
    Router::new()
        .route("/gynecologists", get(list_gynecologists))
        .route("/gynecologists/search", get(search_gynecologists))
        .route("/gynecologists/:id", get(get_gynecologist))
}

async fn list_gynecologists(
    Query(query): Query<DirectoryQuery>,
) -> Json<Vec<&'static Gynecologist>> {
    Json(directory::list(query.area.as_deref(), query.min_rating))
}

async fn search_gynecologists(
    Query(query): Query<DirectoryQuery>,
) -> Json<Vec<&'static Gynecologist>> {
    Json(directory::search(
        query.q.as_deref(),
        query.area.as_deref(),
        query.min_rating,
    ))
}

async fn get_gynecologist(
    Path(id): Path<String>,
) -> Result<Json<&'static Gynecologist>, AppError> {
    directory::find(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Gynecologist not found".into()))
}
