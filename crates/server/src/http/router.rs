use super::handlers::{comments, likes, moderation};
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub fn build_router(state: AppState, allowed_origins: &str) -> Router {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];
    let cors = if allowed_origins == "*" {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_origin(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<HeaderValue>().ok())
            .collect();

        if origins.is_empty() {
            tracing::warn!("CORS config is invalid or empty, falling back to allow ANY.");
            CorsLayer::new()
                .allow_methods(methods)
                .allow_origin(Any)
                .allow_headers(Any)
        } else {
            tracing::info!("CORS enabled for origins: {:?}", origins);
            CorsLayer::new()
                .allow_methods(methods)
                .allow_origin(origins)
                .allow_headers(Any)
        }
    };

    Router::new()
        .route(
            "/api/posts/:post_id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/api/comments/:comment_id",
            put(comments::edit_comment).delete(comments::delete_comment),
        )
        .route(
            "/api/comments/:comment_id/report",
            post(comments::report_comment),
        )
        .route("/api/moderation/reports", get(moderation::list_reports))
        .route(
            "/api/moderation/reports/:report_id/dismiss",
            post(moderation::dismiss_report),
        )
        .route(
            "/api/moderation/reports/:report_id/resolve",
            post(moderation::resolve_report),
        )
        .route(
            "/api/internal/comments/:comment_id/like",
            post(likes::like_comment),
        )
        .route(
            "/api/internal/comments/:comment_id/unlike",
            post(likes::unlike_comment),
        )
        .route("/api/internal/posts", post(likes::upsert_post))
        .layer(cors)
        .with_state(state)
}
