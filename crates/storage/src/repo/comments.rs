use crate::{
    id::new_id,
    models::{join_path, SqlComment},
    Db,
};
use chrono::Utc;
use domain::{
    authorize, authorize_owner, Comment, Error, Page, PageMeta, Result, Role, SortMode,
    MAX_CONTENT_CHARS, TOMBSTONE,
};

fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(Error::validation("comment content cannot be empty"));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(Error::validation(format!(
            "comment content exceeds {} characters",
            MAX_CONTENT_CHARS
        )));
    }
    Ok(())
}

impl Db {
    /// Creates a comment, computing path and depth from the parent. The parent
    /// read and the child insert are two separate statements; a concurrent
    /// burst against a parent sitting one level below the depth limit is not
    /// guarded by a transaction.
    pub async fn create_comment(
        &self,
        post_id: &str,
        author_id: &str,
        content: &str,
        parent_id: Option<&str>,
    ) -> Result<Comment> {
        validate_content(content)?;

        if !self.post_exists(post_id).await? {
            return Err(Error::NotFound("post"));
        }

        let (path, depth) = match parent_id {
            None => (Vec::new(), 0),
            Some(pid) => {
                let parent = self
                    .get_comment(pid)
                    .await?
                    .ok_or(Error::NotFound("parent comment"))?;
                if parent.post_id != post_id {
                    return Err(Error::validation("parent belongs to a different post"));
                }
                if !parent.can_reply() {
                    return Err(Error::DepthExceeded);
                }
                let mut path = parent.path.clone();
                path.push(pid.to_string());
                (path, parent.depth + 1)
            }
        };

        let now = Utc::now().naive_utc();
        let comment = Comment {
            id: new_id(),
            post_id: post_id.to_string(),
            author_id: author_id.to_string(),
            content: content.to_string(),
            path,
            depth,
            parent_id: parent_id.map(str::to_string),
            is_edited: false,
            edited_at: None,
            is_deleted: false,
            deleted_at: None,
            likes_count: 0,
            reports_count: 0,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO comments (
                id, post_id, author_id, content, path, depth, parent_id,
                is_edited, is_deleted, likes_count, reports_count,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, FALSE, FALSE, 0, 0, ?, ?)
            "#,
        )
        .bind(&comment.id)
        .bind(&comment.post_id)
        .bind(&comment.author_id)
        .bind(&comment.content)
        .bind(join_path(&comment.path))
        .bind(comment.depth)
        .bind(&comment.parent_id)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Error::unavailable)?;

        Ok(comment)
    }

    pub async fn get_comment(&self, comment_id: &str) -> Result<Option<Comment>> {
        let row = sqlx::query_as::<_, SqlComment>("SELECT * FROM comments WHERE id = ?")
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::unavailable)?;
        Ok(row.map(Into::into))
    }

    /// Author-only edit. A tombstoned comment is treated as gone.
    pub async fn edit_comment(
        &self,
        comment_id: &str,
        requester_id: &str,
        new_content: &str,
    ) -> Result<Comment> {
        validate_content(new_content)?;

        let mut comment = self
            .get_comment(comment_id)
            .await?
            .ok_or(Error::NotFound("comment"))?;
        if comment.is_deleted {
            return Err(Error::NotFound("comment"));
        }
        authorize_owner(requester_id, &comment.author_id)?;

        let now = Utc::now().naive_utc();
        sqlx::query(
            r#"
            UPDATE comments
            SET content = ?, is_edited = TRUE, edited_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(new_content)
        .bind(now)
        .bind(now)
        .bind(comment_id)
        .execute(&self.pool)
        .await
        .map_err(Error::unavailable)?;

        comment.content = new_content.to_string();
        comment.is_edited = true;
        comment.edited_at = Some(now);
        comment.updated_at = now;
        Ok(comment)
    }

    /// Tombstones the content in place. Descendants keep their path, depth and
    /// parent so the thread shape survives.
    pub async fn soft_delete_comment(
        &self,
        comment_id: &str,
        requester_id: &str,
        requester_role: Role,
    ) -> Result<()> {
        let comment = self
            .get_comment(comment_id)
            .await?
            .ok_or(Error::NotFound("comment"))?;
        authorize(requester_id, requester_role, &comment.author_id)?;

        let now = Utc::now().naive_utc();
        sqlx::query(
            r#"
            UPDATE comments
            SET is_deleted = TRUE, deleted_at = ?, content = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(now)
        .bind(TOMBSTONE)
        .bind(now)
        .bind(comment_id)
        .execute(&self.pool)
        .await
        .map_err(Error::unavailable)?;
        Ok(())
    }

    /// One page of root comments (depth 0). Replies are fetched separately and
    /// always sorted chronologically, whatever sort the roots use. rowid is the
    /// final tiebreak so equal timestamps page deterministically.
    pub async fn list_root_comments(
        &self,
        post_id: &str,
        page: i64,
        limit: i64,
        sort: SortMode,
    ) -> Result<Page<Comment>> {
        let page = page.max(1);
        let limit = limit.max(1);
        let order = match sort {
            SortMode::Newest => "created_at DESC, rowid DESC",
            SortMode::Oldest => "created_at ASC, rowid ASC",
            SortMode::Popular => "likes_count DESC, created_at DESC, rowid DESC",
        };

        let sql = format!(
            "SELECT * FROM comments WHERE post_id = ? AND depth = 0 ORDER BY {} LIMIT ? OFFSET ?",
            order
        );
        let rows = sqlx::query_as::<_, SqlComment>(&sql)
            .bind(post_id)
            .bind(limit)
            .bind((page - 1) * limit)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::unavailable)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comments WHERE post_id = ? AND depth = 0",
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::unavailable)?;

        Ok(Page {
            items: rows.into_iter().map(Into::into).collect(),
            meta: PageMeta::new(page, limit, total),
        })
    }

    /// Every comment whose materialized path starts at `root_id`. Ids are
    /// generated hex, so the LIKE pattern cannot contain wildcards.
    pub async fn get_descendants(&self, root_id: &str) -> Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, SqlComment>(
            r#"
            SELECT * FROM comments
            WHERE path = ? OR path LIKE ? || '/%'
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(root_id)
        .bind(root_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::unavailable)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Batch descendant fetch for one page of roots: a single query for the
    /// post's non-root comments, narrowed to the requested subtrees, instead of
    /// a per-root round trip.
    pub async fn list_descendants_of_roots(
        &self,
        post_id: &str,
        root_ids: &[String],
    ) -> Result<Vec<Comment>> {
        if root_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, SqlComment>(
            r#"
            SELECT * FROM comments
            WHERE post_id = ? AND depth > 0
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::unavailable)?;

        Ok(rows
            .into_iter()
            .map(Comment::from)
            .filter(|c| c.path.first().map_or(false, |root| root_ids.contains(root)))
            .collect())
    }
}
