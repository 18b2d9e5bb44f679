//! Internal endpoints for collaborator events. The Like Engine owns the
//! one-like-per-user constraint and only forwards net like/unlike events;
//! the publishing platform pushes post metadata through the same surface.

use super::api_err;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

pub async fn like_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .db
        .increment_likes(&comment_id)
        .await
        .map_err(api_err)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unlike_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .db
        .decrement_likes(&comment_id)
        .await
        .map_err(api_err)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct UpsertPostRequest {
    pub id: String,
    pub title: String,
    pub slug: String,
}

pub async fn upsert_post(
    State(state): State<AppState>,
    Json(payload): Json<UpsertPostRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .db
        .upsert_post(&payload.id, &payload.title, &payload.slug)
        .await
        .map_err(api_err)?;
    Ok(StatusCode::NO_CONTENT)
}
