use crate::config::LikeEngineSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use domain::LikeEngine;
use serde::Deserialize;
use std::sync::Arc;

/// Client for the external Like Engine's `is_liked` lookup.
pub struct HttpLikeEngine {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct IsLikedResponse {
    liked: bool,
}

#[async_trait]
impl LikeEngine for HttpLikeEngine {
    async fn is_liked(&self, user_id: &str, comment_id: &str) -> Result<bool> {
        let url = format!(
            "{}/likes/{}/{}",
            self.base_url.trim_end_matches('/'),
            user_id,
            comment_id
        );
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Like engine request failed")?
            .error_for_status()
            .context("Like engine returned an error status")?;
        let body: IsLikedResponse = resp
            .json()
            .await
            .context("Like engine returned an invalid body")?;
        Ok(body.liked)
    }
}

/// Stand-in when no engine is configured; listings simply skip enrichment.
pub struct DisabledLikeEngine;

#[async_trait]
impl LikeEngine for DisabledLikeEngine {
    async fn is_liked(&self, _user_id: &str, _comment_id: &str) -> Result<bool> {
        Ok(false)
    }
}

pub fn build(settings: Option<&LikeEngineSettings>) -> Arc<dyn LikeEngine> {
    match settings {
        Some(cfg) => {
            tracing::info!("Like engine enabled at {}", cfg.base_url);
            Arc::new(HttpLikeEngine {
                client: reqwest::Client::new(),
                base_url: cfg.base_url.clone(),
            })
        }
        None => {
            tracing::info!("No like engine configured, is_liked enrichment disabled");
            Arc::new(DisabledLikeEngine)
        }
    }
}
