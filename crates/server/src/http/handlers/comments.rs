use super::api_err;
use crate::{identity::Identity, state::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::{assemble, Comment, CommentNode, Error, PageMeta, Report, SortMode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub parent_id: Option<String>,
}

#[derive(Deserialize)]
pub struct EditCommentRequest {
    pub content: String,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort: Option<SortMode>,
}

#[derive(Serialize)]
pub struct ThreadResponse {
    pub comments: Vec<CommentNode>,
    pub meta: PageMeta,
}

#[derive(Deserialize)]
pub struct CreateReportRequest {
    pub category: String,
    pub reason_text: Option<String>,
}

/// One page of root comments with their full reply subtrees. A signed-in
/// viewer additionally gets `is_liked` on every node.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Query(params): Query<ListParams>,
    viewer: Option<Identity>,
) -> Result<Json<ThreadResponse>, (StatusCode, String)> {
    if !state.db.post_exists(&post_id).await.map_err(api_err)? {
        return Err(api_err(Error::NotFound("post")));
    }

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let sort = params.sort.unwrap_or_default();

    let roots = state
        .db
        .list_root_comments(&post_id, page, limit, sort)
        .await
        .map_err(api_err)?;
    let root_ids: Vec<String> = roots.items.iter().map(|c| c.id.clone()).collect();
    let descendants = state
        .db
        .list_descendants_of_roots(&post_id, &root_ids)
        .await
        .map_err(api_err)?;

    let liked = match &viewer {
        Some(ident) => Some(liked_set(&state, ident, roots.items.iter().chain(&descendants)).await),
        None => None,
    };

    let comments = assemble(roots.items, descendants, liked.as_ref());
    Ok(Json(ThreadResponse {
        comments,
        meta: roots.meta,
    }))
}

/// Asks the Like Engine about each comment on the page. A failed lookup
/// degrades to "not liked" rather than failing the listing.
async fn liked_set<'a>(
    state: &AppState,
    viewer: &Identity,
    comments: impl Iterator<Item = &'a Comment>,
) -> HashSet<String> {
    let mut set = HashSet::new();
    for comment in comments {
        match state.likes.is_liked(&viewer.user_id, &comment.id).await {
            Ok(true) => {
                set.insert(comment.id.clone());
            }
            Ok(false) => {}
            Err(e) => tracing::warn!("Like engine lookup failed: {:#}", e),
        }
    }
    set
}

pub async fn create_comment(
    State(state): State<AppState>,
    ident: Identity,
    Path(post_id): Path<String>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), (StatusCode, String)> {
    let comment = state
        .db
        .create_comment(
            &post_id,
            &ident.user_id,
            &payload.content,
            payload.parent_id.as_deref(),
        )
        .await
        .map_err(api_err)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn edit_comment(
    State(state): State<AppState>,
    ident: Identity,
    Path(comment_id): Path<String>,
    Json(payload): Json<EditCommentRequest>,
) -> Result<Json<Comment>, (StatusCode, String)> {
    let comment = state
        .db
        .edit_comment(&comment_id, &ident.user_id, &payload.content)
        .await
        .map_err(api_err)?;
    Ok(Json(comment))
}

/// Owner or moderator; the store runs the authorization check.
pub async fn delete_comment(
    State(state): State<AppState>,
    ident: Identity,
    Path(comment_id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .db
        .soft_delete_comment(&comment_id, &ident.user_id, ident.role)
        .await
        .map_err(api_err)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn report_comment(
    State(state): State<AppState>,
    ident: Identity,
    Path(comment_id): Path<String>,
    Json(payload): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<Report>), (StatusCode, String)> {
    let category = payload
        .category
        .parse()
        .map_err(|e: String| api_err(Error::validation(e)))?;
    let report = state
        .db
        .create_report(
            &comment_id,
            &ident.user_id,
            category,
            payload.reason_text.as_deref(),
        )
        .await
        .map_err(api_err)?;
    Ok((StatusCode::CREATED, Json(report)))
}
