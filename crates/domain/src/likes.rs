use anyhow::Result;
use async_trait::async_trait;

/// Seam to the external Like Engine. It owns the one-like-per-(user,comment)
/// constraint; the core only asks it to enrich listings for a signed-in viewer.
#[async_trait]
pub trait LikeEngine: Send + Sync {
    async fn is_liked(&self, user_id: &str, comment_id: &str) -> Result<bool>;
}
