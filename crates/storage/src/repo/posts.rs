use crate::Db;
use chrono::Utc;
use domain::{Error, Result};

/// Minimal mirror of the external post repository: the core only needs
/// existence checks and title/slug for the moderator report view.
impl Db {
    pub async fn upsert_post(&self, post_id: &str, title: &str, slug: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, slug, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                slug = excluded.slug
            "#,
        )
        .bind(post_id)
        .bind(title)
        .bind(slug)
        .bind(Utc::now().naive_utc())
        .execute(&self.pool)
        .await
        .map_err(Error::unavailable)?;
        Ok(())
    }

    pub async fn post_exists(&self, post_id: &str) -> Result<bool> {
        let row = sqlx::query_scalar::<_, i64>("SELECT 1 FROM posts WHERE id = ?")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::unavailable)?;
        Ok(row.is_some())
    }
}
