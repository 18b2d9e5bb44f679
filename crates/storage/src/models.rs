use chrono::NaiveDateTime;
use domain::{Comment, Error, Report, ReportView};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlComment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub path: String,
    pub depth: i64,
    pub parent_id: Option<String>,
    pub is_edited: bool,
    pub edited_at: Option<NaiveDateTime>,
    pub is_deleted: bool,
    pub deleted_at: Option<NaiveDateTime>,
    pub likes_count: i64,
    pub reports_count: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// '/'-joined materialized path column ⇄ ancestor id list.
pub(crate) fn join_path(path: &[String]) -> String {
    path.join("/")
}

pub(crate) fn split_path(path: &str) -> Vec<String> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').map(str::to_string).collect()
    }
}

impl From<SqlComment> for Comment {
    fn from(sql: SqlComment) -> Self {
        Comment {
            id: sql.id,
            post_id: sql.post_id,
            author_id: sql.author_id,
            content: sql.content,
            path: split_path(&sql.path),
            depth: sql.depth,
            parent_id: sql.parent_id,
            is_edited: sql.is_edited,
            edited_at: sql.edited_at,
            is_deleted: sql.is_deleted,
            deleted_at: sql.deleted_at,
            likes_count: sql.likes_count,
            reports_count: sql.reports_count,
            created_at: sql.created_at,
            updated_at: sql.updated_at,
        }
    }
}

#[derive(FromRow)]
pub struct SqlReport {
    pub id: String,
    pub comment_id: String,
    pub reporter_id: String,
    pub category: String,
    pub reason_text: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<SqlReport> for Report {
    type Error = Error;

    fn try_from(sql: SqlReport) -> Result<Self, Error> {
        Ok(Report {
            category: sql
                .category
                .parse()
                .map_err(|e| Error::unavailable(format!("corrupt report row: {}", e)))?,
            status: sql
                .status
                .parse()
                .map_err(|e| Error::unavailable(format!("corrupt report row: {}", e)))?,
            id: sql.id,
            comment_id: sql.comment_id,
            reporter_id: sql.reporter_id,
            reason_text: sql.reason_text,
            created_at: sql.created_at,
        })
    }
}

/// Report joined with comment and post context for the moderator list.
#[derive(FromRow)]
pub struct SqlReportView {
    pub id: String,
    pub comment_id: String,
    pub reporter_id: String,
    pub category: String,
    pub reason_text: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub comment_content: String,
    pub comment_author_id: String,
    pub post_id: String,
    pub post_title: String,
    pub post_slug: String,
}

impl TryFrom<SqlReportView> for ReportView {
    type Error = Error;

    fn try_from(sql: SqlReportView) -> Result<Self, Error> {
        let report = Report::try_from(SqlReport {
            id: sql.id,
            comment_id: sql.comment_id,
            reporter_id: sql.reporter_id,
            category: sql.category,
            reason_text: sql.reason_text,
            status: sql.status,
            created_at: sql.created_at,
        })?;
        Ok(ReportView {
            report,
            comment_content: sql.comment_content,
            comment_author_id: sql.comment_author_id,
            post_id: sql.post_id,
            post_title: sql.post_title,
            post_slug: sql.post_slug,
        })
    }
}
