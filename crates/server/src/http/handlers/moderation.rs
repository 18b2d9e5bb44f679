use super::api_err;
use crate::{identity::Identity, state::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::{PageMeta, ReportView};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct QueueParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct QueueResponse {
    pub reports: Vec<ReportView>,
    pub meta: PageMeta,
}

pub async fn list_reports(
    State(state): State<AppState>,
    ident: Identity,
    Query(params): Query<QueueParams>,
) -> Result<Json<QueueResponse>, (StatusCode, String)> {
    ident.require_moderator()?;

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(20).clamp(1, 100);

    let queue = state
        .db
        .list_pending_reports(page, limit)
        .await
        .map_err(api_err)?;
    Ok(Json(QueueResponse {
        reports: queue.items,
        meta: queue.meta,
    }))
}

pub async fn dismiss_report(
    State(state): State<AppState>,
    ident: Identity,
    Path(report_id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    ident.require_moderator()?;
    state.db.dismiss_report(&report_id).await.map_err(api_err)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Closes the report by tombstoning the comment it points at. Other pending
/// reports on that comment stay in the queue.
pub async fn resolve_report(
    State(state): State<AppState>,
    ident: Identity,
    Path(report_id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    ident.require_moderator()?;
    state
        .db
        .resolve_report_by_deleting_comment(&report_id, &ident.user_id)
        .await
        .map_err(api_err)?;
    Ok(StatusCode::NO_CONTENT)
}
