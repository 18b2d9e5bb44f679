use crate::Db;
use domain::{Error, Result};

/// Denormalized counters are mutated with single-statement atomic updates so
/// concurrent likes and reports never lose an increment. No read-modify-write.
impl Db {
    pub async fn increment_likes(&self, comment_id: &str) -> Result<()> {
        let res = sqlx::query("UPDATE comments SET likes_count = likes_count + 1 WHERE id = ?")
            .bind(comment_id)
            .execute(&self.pool)
            .await
            .map_err(Error::unavailable)?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("comment"));
        }
        Ok(())
    }

    /// Clamped at zero. The Like Engine's own uniqueness constraint should make
    /// an underflow impossible; the clamp keeps the invariant anyway.
    pub async fn decrement_likes(&self, comment_id: &str) -> Result<()> {
        let res =
            sqlx::query("UPDATE comments SET likes_count = MAX(likes_count - 1, 0) WHERE id = ?")
                .bind(comment_id)
                .execute(&self.pool)
                .await
                .map_err(Error::unavailable)?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("comment"));
        }
        Ok(())
    }

    pub async fn increment_reports(&self, comment_id: &str) -> Result<()> {
        let res = sqlx::query("UPDATE comments SET reports_count = reports_count + 1 WHERE id = ?")
            .bind(comment_id)
            .execute(&self.pool)
            .await
            .map_err(Error::unavailable)?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("comment"));
        }
        Ok(())
    }
}
