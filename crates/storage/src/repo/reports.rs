use crate::{
    id::new_id,
    models::{SqlReport, SqlReportView},
    Db,
};
use chrono::Utc;
use domain::{
    Error, Page, PageMeta, Report, ReportCategory, ReportStatus, ReportView, Result, Role,
    MAX_REASON_CHARS,
};

impl Db {
    /// Appends a pending report and bumps the comment's report counter. Two
    /// sequential single-row writes, no cross-document transaction. Repeat
    /// reports by the same reporter are allowed.
    pub async fn create_report(
        &self,
        comment_id: &str,
        reporter_id: &str,
        category: ReportCategory,
        reason_text: Option<&str>,
    ) -> Result<Report> {
        if let Some(reason) = reason_text {
            if reason.chars().count() > MAX_REASON_CHARS {
                return Err(Error::validation(format!(
                    "report reason exceeds {} characters",
                    MAX_REASON_CHARS
                )));
            }
        }

        if self.get_comment(comment_id).await?.is_none() {
            return Err(Error::NotFound("comment"));
        }

        let report = Report {
            id: new_id(),
            comment_id: comment_id.to_string(),
            reporter_id: reporter_id.to_string(),
            category,
            reason_text: reason_text.map(str::to_string),
            status: ReportStatus::Pending,
            created_at: Utc::now().naive_utc(),
        };

        sqlx::query(
            r#"
            INSERT INTO reports (id, comment_id, reporter_id, category, reason_text, status, created_at)
            VALUES (?, ?, ?, ?, ?, 'pending', ?)
            "#,
        )
        .bind(&report.id)
        .bind(&report.comment_id)
        .bind(&report.reporter_id)
        .bind(report.category.as_str())
        .bind(&report.reason_text)
        .bind(report.created_at)
        .execute(&self.pool)
        .await
        .map_err(Error::unavailable)?;

        self.increment_reports(comment_id).await?;

        Ok(report)
    }

    pub async fn get_report(&self, report_id: &str) -> Result<Option<Report>> {
        let row = sqlx::query_as::<_, SqlReport>("SELECT * FROM reports WHERE id = ?")
            .bind(report_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::unavailable)?;
        row.map(Report::try_from).transpose()
    }

    /// The moderation queue: pending reports oldest-first, joined with the
    /// reported comment and its post for moderator display.
    pub async fn list_pending_reports(&self, page: i64, limit: i64) -> Result<Page<ReportView>> {
        let page = page.max(1);
        let limit = limit.max(1);

        let rows = sqlx::query_as::<_, SqlReportView>(
            r#"
            SELECT
                r.id, r.comment_id, r.reporter_id, r.category, r.reason_text,
                r.status, r.created_at,
                c.content AS comment_content,
                c.author_id AS comment_author_id,
                p.id AS post_id,
                p.title AS post_title,
                p.slug AS post_slug
            FROM reports r
            JOIN comments c ON r.comment_id = c.id
            JOIN posts p ON c.post_id = p.id
            WHERE r.status = 'pending'
            ORDER BY r.created_at ASC, r.rowid ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::unavailable)?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reports WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await
                .map_err(Error::unavailable)?;

        let items = rows
            .into_iter()
            .map(ReportView::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page {
            items,
            meta: PageMeta::new(page, limit, total),
        })
    }

    /// Unconditional terminal write: dismissing an already-closed report is a
    /// no-op success, not an error.
    pub async fn dismiss_report(&self, report_id: &str) -> Result<()> {
        let res = sqlx::query("UPDATE reports SET status = 'dismissed' WHERE id = ?")
            .bind(report_id)
            .execute(&self.pool)
            .await
            .map_err(Error::unavailable)?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("report"));
        }
        Ok(())
    }

    /// Soft-deletes the reported comment as the moderator, then closes this
    /// report. Sibling pending reports on the same comment are left pending.
    /// If the delete step fails the report keeps its current status.
    pub async fn resolve_report_by_deleting_comment(
        &self,
        report_id: &str,
        moderator_id: &str,
    ) -> Result<()> {
        let report = self
            .get_report(report_id)
            .await?
            .ok_or(Error::NotFound("report"))?;

        self.soft_delete_comment(&report.comment_id, moderator_id, Role::Moderator)
            .await?;

        sqlx::query("UPDATE reports SET status = 'resolved' WHERE id = ?")
            .bind(report_id)
            .execute(&self.pool)
            .await
            .map_err(Error::unavailable)?;
        Ok(())
    }
}
